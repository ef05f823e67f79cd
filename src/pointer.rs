//! Input sources and pointers.
//!
//! Every live controller is announced to the input consumer as an [`InputSource`]. A
//! source may own pointers (rays used for focus/selection); once the controller is built,
//! each pointer is bound back to it by raw device id.
//!
//! Hosts that manage sources themselves implement [`SourceProvider`]; everyone else uses
//! [`DefaultSourceProvider`].

use crate::classifier::{ControllerType, Handedness};

/// A pointing ray owned by an input source.
#[derive(Clone, Debug, PartialEq)]
pub struct Pointer {
    pub id: u32,
    pub name: String,
    /// Raw device id of the controller driving this pointer, once bound.
    pub controller: Option<String>,
    /// Ray length in metres.
    pub extent: f32,
    pub interaction_enabled: bool,
}

impl Pointer {
    pub fn new(id: u32, name: impl Into<String>, extent: f32) -> Self {
        Self {
            id,
            name: name.into(),
            controller: None,
            extent,
            interaction_enabled: true,
        }
    }
}

/// Input source handed out by the input consumer.
#[derive(Clone, Debug, PartialEq)]
pub struct InputSource {
    pub id: u32,
    pub name: String,
    pub pointers: Vec<Pointer>,
}

impl InputSource {
    /// Bind every pointer to the controller identified by `raw_device_id`.
    pub fn bind_pointers(&mut self, raw_device_id: &str) {
        for pointer in &mut self.pointers {
            pointer.controller = Some(raw_device_id.to_string());
        }
    }
}

/// Allocates input sources and pointers for newly detected controllers.
pub trait SourceProvider {
    fn request_pointers(
        &mut self,
        controller_type: ControllerType,
        handedness: Handedness,
    ) -> Vec<Pointer>;

    fn request_input_source(&mut self, name: &str, pointers: Vec<Pointer>) -> InputSource;
}

/// Sequential id allocator. Tracked motion controllers get one spatial pointer.
#[derive(Debug)]
pub struct DefaultSourceProvider {
    next_source_id: u32,
    next_pointer_id: u32,
    pointer_extent: f32,
}

impl DefaultSourceProvider {
    pub fn new(pointer_extent: f32) -> Self {
        Self {
            next_source_id: 1,
            next_pointer_id: 1,
            pointer_extent,
        }
    }
}

impl Default for DefaultSourceProvider {
    fn default() -> Self {
        Self::new(10.0)
    }
}

impl SourceProvider for DefaultSourceProvider {
    fn request_pointers(
        &mut self,
        controller_type: ControllerType,
        handedness: Handedness,
    ) -> Vec<Pointer> {
        match controller_type {
            ControllerType::None
            | ControllerType::GenericUnity
            | ControllerType::OculusRemote
            | ControllerType::Xbox => Vec::new(),
            _ => {
                let id = self.next_pointer_id;
                self.next_pointer_id += 1;
                vec![Pointer::new(
                    id,
                    format!("{handedness} Spatial Pointer"),
                    self.pointer_extent,
                )]
            }
        }
    }

    fn request_input_source(&mut self, name: &str, pointers: Vec<Pointer>) -> InputSource {
        let id = self.next_source_id;
        self.next_source_id += 1;
        InputSource {
            id,
            name: name.to_string(),
            pointers,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_ids_are_sequential() {
        let mut provider = DefaultSourceProvider::default();
        let pointers = provider.request_pointers(ControllerType::ViveWand, Handedness::Left);
        assert_eq!(pointers.len(), 1);
        assert_eq!(pointers[0].name, "Left Spatial Pointer");
        assert_eq!(pointers[0].extent, 10.0);

        let a = provider.request_input_source("a", pointers);
        let b = provider.request_input_source("b", Vec::new());
        assert_eq!(a.id + 1, b.id);
    }

    #[test]
    fn test_gamepads_have_no_pointers() {
        let mut provider = DefaultSourceProvider::default();
        assert!(provider
            .request_pointers(ControllerType::Xbox, Handedness::None)
            .is_empty());
    }

    #[test]
    fn test_bind_pointers() {
        let mut source = InputSource {
            id: 1,
            name: "src".into(),
            pointers: vec![Pointer::new(1, "p", 5.0)],
        };
        source.bind_pointers("Vive Wand Left");
        assert_eq!(source.pointers[0].controller.as_deref(), Some("Vive Wand Left"));
    }
}
