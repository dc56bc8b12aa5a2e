//! Contracts consumed from the host UI framework.
//!
//! Both traits take `&self`: hosts are shared behind `Rc` and may be called
//! back into while one of their own events is still on the stack, so
//! implementations keep their state behind interior mutability.

use crate::error::Result;
use crate::locator::Locator;

/// The host's navigation/history stack.
pub trait NavigationHost {
    /// Whether the history has an entry to go back to.
    fn can_go_back(&self) -> bool;

    /// Locator of the page currently shown.
    fn current_locator(&self) -> Option<Locator>;

    fn navigate(&self, target: &Locator) -> Result<()>;

    fn go_back(&self) -> Result<()>;

    fn go_forward(&self) -> Result<()>;
}

/// The visual element a page animates.
pub trait AnimationSurface {
    /// Set surface opacity, `0.0` hidden to `1.0` fully visible.
    fn set_opacity(&self, value: f64);

    /// Whether a layout pass has already completed for the current content.
    ///
    /// Lets a surface bound after its first layout release the readiness
    /// gate without waiting for another pass.
    fn has_completed_layout(&self) -> bool {
        false
    }
}
