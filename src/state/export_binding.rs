//! Lifecycle-safe binding of the host's export capability.
//!
//! The host (when it is the active foreground context) offers an opaque
//! "export this payload" capability. The binding wires that capability into
//! the render adapter when the adapter exists, or parks it until the
//! adapter is created, and clears it again when the host goes away so no
//! reference to a torn-down host is retained.

use std::cell::RefCell;
use std::io;
use std::path::PathBuf;
use std::rc::Rc;

/// Opaque host capability that persists the currently displayed payload.
///
/// The payload view only manages this capability's attach/detach lifecycle;
/// execution (where and how bytes are written) belongs to the host.
pub trait ExportPayloadHandler {
    /// Export the given payload bytes, returning where they were written.
    fn export_payload(&self, payload: &[u8]) -> io::Result<PathBuf>;
}

/// The render-adapter side of the binding.
pub trait ExportBindable {
    /// Replace the currently bound export handler (or clear it with `None`).
    fn set_export_handler(&mut self, handler: Option<Rc<dyn ExportPayloadHandler>>);
}

/// Attaches and detaches the export capability across host lifecycle
/// transitions.
///
/// At most one target is bound at any time; attaching a new target fully
/// replaces any previous one.
#[derive(Default)]
pub struct ExportHandlerBinding {
    adapter: Option<Rc<RefCell<dyn ExportBindable>>>,
    pending: Option<Rc<dyn ExportPayloadHandler>>,
}

impl ExportHandlerBinding {
    /// New binding with no adapter and no target.
    pub fn new() -> Self {
        Self::default()
    }

    /// Bind `target` as the export handler.
    ///
    /// Applied to the adapter immediately when one exists, otherwise stored
    /// and applied once [`register_adapter`](Self::register_adapter) runs.
    pub fn attach(&mut self, target: Rc<dyn ExportPayloadHandler>) {
        if let Some(adapter) = &self.adapter {
            adapter.borrow_mut().set_export_handler(Some(target.clone()));
        }
        self.pending = Some(target);
    }

    /// Clear the bound export handler.
    ///
    /// Must run whenever the host stops being the active foreground
    /// context; afterwards neither the binding nor the adapter holds a
    /// handler.
    pub fn detach(&mut self) {
        if let Some(adapter) = &self.adapter {
            adapter.borrow_mut().set_export_handler(None);
        }
        self.pending = None;
    }

    /// Register the render adapter, applying any target attached before the
    /// adapter existed.
    pub fn register_adapter(&mut self, adapter: Rc<RefCell<dyn ExportBindable>>) {
        if let Some(target) = &self.pending {
            adapter.borrow_mut().set_export_handler(Some(target.clone()));
        }
        self.adapter = Some(adapter);
    }

    /// Whether a target is currently bound.
    pub fn is_attached(&self) -> bool {
        self.pending.is_some()
    }
}

impl std::fmt::Debug for ExportHandlerBinding {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ExportHandlerBinding")
            .field("has_adapter", &self.adapter.is_some())
            .field("has_target", &self.pending.is_some())
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    /// Adapter double that records the handler it was given.
    #[derive(Default)]
    struct FakeAdapter {
        handler: Option<Rc<dyn ExportPayloadHandler>>,
        set_calls: usize,
    }

    impl ExportBindable for FakeAdapter {
        fn set_export_handler(&mut self, handler: Option<Rc<dyn ExportPayloadHandler>>) {
            self.handler = handler;
            self.set_calls += 1;
        }
    }

    /// Handler double identified by a name.
    struct NamedHandler(&'static str);

    impl ExportPayloadHandler for NamedHandler {
        fn export_payload(&self, _payload: &[u8]) -> io::Result<PathBuf> {
            Ok(PathBuf::from(self.0))
        }
    }

    fn bound_name(adapter: &Rc<RefCell<FakeAdapter>>) -> Option<&'static str> {
        adapter.borrow().handler.as_ref().map(|h| {
            match h.export_payload(&[]) {
                Ok(path) => match path.to_str() {
                    Some("X") => "X",
                    Some("Y") => "Y",
                    _ => "?",
                },
                Err(_) => "?",
            }
        })
    }

    #[test]
    fn attach_with_adapter_binds_immediately() {
        let adapter = Rc::new(RefCell::new(FakeAdapter::default()));
        let mut binding = ExportHandlerBinding::new();
        binding.register_adapter(adapter.clone());

        binding.attach(Rc::new(NamedHandler("X")));

        assert!(binding.is_attached());
        assert_eq!(bound_name(&adapter), Some("X"));
    }

    #[test]
    fn attach_before_adapter_is_applied_on_registration() {
        let mut binding = ExportHandlerBinding::new();
        binding.attach(Rc::new(NamedHandler("X")));

        let adapter = Rc::new(RefCell::new(FakeAdapter::default()));
        binding.register_adapter(adapter.clone());

        assert_eq!(bound_name(&adapter), Some("X"));
    }

    #[test]
    fn detach_clears_handler_everywhere() {
        let adapter = Rc::new(RefCell::new(FakeAdapter::default()));
        let mut binding = ExportHandlerBinding::new();
        binding.register_adapter(adapter.clone());
        binding.attach(Rc::new(NamedHandler("X")));

        binding.detach();

        assert!(!binding.is_attached());
        assert!(adapter.borrow().handler.is_none());
    }

    #[test]
    fn detach_without_adapter_is_safe() {
        let mut binding = ExportHandlerBinding::new();
        binding.attach(Rc::new(NamedHandler("X")));
        binding.detach();
        assert!(!binding.is_attached());

        // A later adapter registration must not resurrect the old target.
        let adapter = Rc::new(RefCell::new(FakeAdapter::default()));
        binding.register_adapter(adapter.clone());
        assert!(adapter.borrow().handler.is_none());
    }

    #[test]
    fn attach_after_detach_binds_exactly_the_new_target() {
        let adapter = Rc::new(RefCell::new(FakeAdapter::default()));
        let mut binding = ExportHandlerBinding::new();
        binding.register_adapter(adapter.clone());

        binding.attach(Rc::new(NamedHandler("X")));
        binding.detach();
        binding.attach(Rc::new(NamedHandler("Y")));

        assert_eq!(bound_name(&adapter), Some("Y"));
    }

    #[test]
    fn attach_replaces_previous_target() {
        let adapter = Rc::new(RefCell::new(FakeAdapter::default()));
        let mut binding = ExportHandlerBinding::new();
        binding.register_adapter(adapter.clone());

        binding.attach(Rc::new(NamedHandler("X")));
        binding.attach(Rc::new(NamedHandler("Y")));

        assert_eq!(bound_name(&adapter), Some("Y"));
        assert_eq!(adapter.borrow().set_calls, 2);
    }
}
