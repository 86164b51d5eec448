//! Callback handles invoked by the interface.
//!
//! The interface only stores and invokes callbacks; what they do belongs to
//! the host's scripting runtime.

use std::fmt;
use std::rc::Rc;

/// Argument passed to a callback.
#[derive(Debug, Clone, PartialEq)]
pub enum CallbackArg {
    /// No argument.
    None,
    /// Checkbox state.
    Bool(bool),
    /// Slider value.
    Float(f32),
    /// Dropdown option text.
    Text(String),
}

/// Opaque handle identifying a script function in the host runtime.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub struct ScriptHandle(pub u64);

/// A callable bound to a script handle.
#[derive(Clone)]
pub struct Callback {
    handle: ScriptHandle,
    function: Rc<dyn Fn(CallbackArg)>,
}

impl Callback {
    /// Binds a function to a script handle.
    pub fn new(handle: ScriptHandle, function: impl Fn(CallbackArg) + 'static) -> Self {
        Self {
            handle,
            function: Rc::new(function),
        }
    }

    /// Wraps a function with no associated script handle.
    pub fn from_fn(function: impl Fn(CallbackArg) + 'static) -> Self {
        Self::new(ScriptHandle::default(), function)
    }

    /// Script handle this callback was bound with.
    #[must_use]
    pub const fn handle(&self) -> ScriptHandle {
        self.handle
    }

    /// Invokes the callback.
    pub fn invoke(&self, arg: CallbackArg) {
        (self.function)(arg);
    }
}

impl fmt::Debug for Callback {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Callback").field("handle", &self.handle).finish_non_exhaustive()
    }
}

/// Invokes an optional callback.
pub(crate) fn fire(callback: Option<&Callback>, arg: CallbackArg) {
    if let Some(callback) = callback {
        callback.invoke(arg);
    }
}
