//! The host-facing field.
//!
//! The block editor only sees the [`Field`] contract: read and write the
//! image address, open and close the dropdown. [`GanPaintField`] implements
//! it on top of a [`PanelController`] and holds the one listener that lives
//! as long as the field itself, the press on the field thumbnail.

use std::sync::Arc;
use crate::config::FieldConfig;
use crate::error::FieldResult;
use crate::event::{EditorEvent, EventHandler};
use crate::gallery::Gallery;
use crate::image::ImageRef;
use crate::input::{InputEvent, ListenerKind, ListenerRegistry, Subscription};
use crate::panel::PanelController;
use crate::service::EditService;
use crate::state::{FieldSnapshot, FieldValue, SharedFieldValue};

/// Capabilities the host editor needs from a field
pub trait Field {
    /// Current image address
    fn get_value(&self) -> String;
    /// Replaces the image address. Empty or unchanged addresses are ignored.
    fn set_value(&mut self, address: &str);
    fn open(&mut self);
    fn close(&mut self);
}

#[derive(Debug)]
pub struct GanPaintField {
    controller: PanelController,
    _field_press: Subscription,
}

impl GanPaintField {
    /// Creates a field showing the first gallery seed.
    pub fn new(config: FieldConfig, service: Arc<dyn EditService>) -> Self {
        let image = Gallery::new(&config).default_image();
        Self::with_value(config, service, FieldValue::new(image))
    }

    pub fn with_value(config: FieldConfig, service: Arc<dyn EditService>, value: FieldValue) -> Self {
        let listeners = ListenerRegistry::new();
        let field_press = listeners.bind(ListenerKind::FieldPress);
        log::debug!("Field created on {}", value.image);
        Self {
            controller: PanelController::new(config, service, SharedFieldValue::new(value), listeners),
            _field_press: field_press,
        }
    }

    /// Builds a field from a JSON [`FieldConfig`].
    pub fn from_json(config: &str, service: Arc<dyn EditService>) -> FieldResult<Self> {
        let config = FieldConfig::from_json(config)?;
        Ok(Self::new(config, service))
    }

    pub fn subscribe(&self, handler: Box<dyn EventHandler>) {
        self.controller.subscribe(handler);
    }

    /// Read-only handle on the persisted value, shared with the panel
    pub fn value_handle(&self) -> SharedFieldValue {
        self.controller.value().clone()
    }

    pub fn panel(&self) -> &PanelController {
        &self.controller
    }

    pub fn panel_mut(&mut self) -> &mut PanelController {
        &mut self.controller
    }

    pub fn is_open(&self) -> bool {
        self.controller.is_open()
    }

    /// Feeds one pointer event from the host. Returns whether it was consumed.
    pub fn handle_input(&mut self, event: &InputEvent) -> bool {
        self.controller.handle_input(event)
    }

    /// Drives an in-flight commit. Call once per frame.
    pub fn poll(&mut self) {
        self.controller.poll();
    }

    pub fn snapshot(&self) -> FieldSnapshot {
        FieldSnapshot::new(self.controller.value().get())
    }

    /// Restores a saved value. The panel is closed first; a changed image
    /// raises one change notification.
    pub fn restore(&mut self, snapshot: FieldSnapshot) {
        self.controller.close();
        if let Some(change) = self.controller.value().restore(snapshot.value) {
            log::info!("Field restored: {} -> {}", change.old, change.new);
            let image = change.new.clone();
            self.controller.emit(EditorEvent::ValueChanged(change));
            self.controller.emit(EditorEvent::ImageRedraw { image });
        }
    }

    pub fn restore_json(&mut self, json: &str) -> FieldResult<()> {
        let snapshot = FieldSnapshot::from_json(json)?;
        self.restore(snapshot);
        Ok(())
    }
}

impl Field for GanPaintField {
    fn get_value(&self) -> String {
        self.controller.value().image().as_str().to_owned()
    }

    fn set_value(&mut self, address: &str) {
        self.controller.set_value(ImageRef::from(address));
    }

    fn open(&mut self) {
        self.controller.open();
    }

    fn close(&mut self) {
        self.controller.close();
    }
}
