//! Live macOS window server
//!
//! Window bounds come from Quartz Window Services
//! (`CGWindowListCopyWindowInfo`), display bounds from `CGDisplayBounds`,
//! and screen frames from AppKit's `NSScreen`.
//!
//! Must be constructed on the main thread: AppKit only hands out screen
//! information there.

use core_foundation::base::{CFType, TCFType};
use core_foundation::dictionary::{CFDictionary, CFDictionaryRef};
use core_foundation::string::CFString;
use core_graphics::display::CGDisplay;
use core_graphics::geometry::CGRect;
use core_graphics::window::{
    copy_window_info, kCGWindowBounds, kCGWindowListExcludeDesktopElements,
    kCGWindowListOptionIncludingWindow,
};
use objc2_app_kit::{NSApplication, NSScreen};
use objc2_foundation::{ns_string, MainThreadMarker, NSNumber, NSRect};

use super::traits::{EnvError, EnvResult, WindowEnvironment};
use crate::screen::{Display, DisplayRegistry, Native, Platform, Rect, ScreenError, WindowId};

/// Environment backed by the running window server
pub struct MacOSEnvironment {
    mtm: MainThreadMarker,
}

impl MacOSEnvironment {
    pub fn new() -> EnvResult<Self> {
        let mtm = MainThreadMarker::new().ok_or_else(|| {
            EnvError::Unavailable("screen queries must run on the main thread".to_string())
        })?;

        // NSScreen is only populated once the shared application exists
        let _ = NSApplication::sharedApplication(mtm);

        Ok(Self { mtm })
    }
}

impl WindowEnvironment for MacOSEnvironment {
    fn list_displays(&self) -> DisplayRegistry {
        let screens = NSScreen::screens(self.mtm);

        let displays: Vec<Display> = screens
            .iter()
            .enumerate()
            .map(|(index, screen)| {
                let id = display_id(&screen);
                if id.is_none() {
                    tracing::debug!("screen {} has no display number", index);
                }
                Display {
                    index,
                    id,
                    native_bounds: id.map(|id| from_cg_rect(CGDisplay::new(id).bounds())),
                    frame: from_ns_rect(screen.frame()),
                    visible_frame: from_ns_rect(screen.visibleFrame()),
                }
            })
            .collect();

        // NSScreen.mainScreen is the screen holding the key window
        let primary = NSScreen::mainScreen(self.mtm).map(|main| {
            let main_id = display_id(&main);
            displays
                .iter()
                .position(|d| d.id.is_some() && d.id == main_id)
                .unwrap_or(0)
        });

        DisplayRegistry::new(displays, primary)
    }

    fn bounds_of(&self, id: WindowId) -> Result<Rect<Native>, ScreenError> {
        window_bounds(id.0)
            .map(from_cg_rect)
            .ok_or(ScreenError::NotFound(id))
    }
}

/// `CGDirectDisplayID` stored under `NSScreenNumber` in the device description
fn display_id(screen: &NSScreen) -> Option<u32> {
    let description = screen.deviceDescription();
    // SAFETY: the device description maps NSString keys to Foundation objects
    let value = unsafe { description.objectForKey(ns_string!("NSScreenNumber")) }?;
    let number = value.downcast::<NSNumber>().ok()?;
    Some(number.unsignedIntValue())
}

/// Quartz bounds of a single on-screen window
fn window_bounds(window_id: u32) -> Option<CGRect> {
    let options = kCGWindowListOptionIncludingWindow | kCGWindowListExcludeDesktopElements;
    let list = copy_window_info(options, window_id)?;
    let info_ref = *list.get(0)?;
    if info_ref.is_null() {
        return None;
    }

    // SAFETY: each entry of the window list is a CFDictionary of window
    // attributes, retained by `list` for the duration of this call
    let info: CFDictionary<CFString, CFType> =
        unsafe { CFDictionary::wrap_under_get_rule(info_ref as CFDictionaryRef) };
    // SAFETY: kCGWindowBounds is a constant CFString provided by CoreGraphics
    let key = unsafe { CFString::wrap_under_get_rule(kCGWindowBounds) };

    let bounds = info.find(&key)?;
    if !bounds.instance_of::<CFDictionary>() {
        return None;
    }
    // SAFETY: type checked above
    let bounds: CFDictionary =
        unsafe { CFDictionary::wrap_under_get_rule(bounds.as_CFTypeRef() as CFDictionaryRef) };

    CGRect::from_dict_representation(&bounds)
}

fn from_cg_rect(rect: CGRect) -> Rect<Native> {
    Rect::new(rect.origin.x, rect.origin.y, rect.size.width, rect.size.height)
}

fn from_ns_rect(rect: NSRect) -> Rect<Platform> {
    Rect::new(rect.origin.x, rect.origin.y, rect.size.width, rect.size.height)
}
