//! Controller registry.
//!
//! Caches one [`Controller`] per raw device id. A miss runs the whole construction chain:
//! classify the name, build the variant, request an input source and pointers, bind the
//! pointers, fire the optional render hook, then insert. Any failure leaves the registry
//! untouched, so the next lookup for that id tries again from scratch.

use crate::classifier::{ControllerType, DeviceClassifier};
use crate::controller::{Controller, TrackingState};
use crate::error::Result;
use crate::pointer::{DefaultSourceProvider, SourceProvider};
use crate::variant::VariantFactory;
use std::collections::HashMap;
use tracing::{debug, error, info};

/// Fire-and-forget notification that a controller model can be shown.
pub trait ModelRenderHook {
    fn render_model(&mut self, controller_type: ControllerType, controller: &Controller);
}

/// Raw device id → live controller.
pub struct ControllerRegistry {
    classifier: DeviceClassifier,
    factory: VariantFactory,
    sources: Box<dyn SourceProvider>,
    render_hook: Option<Box<dyn ModelRenderHook>>,
    controllers: HashMap<String, Controller>,
}

impl Default for ControllerRegistry {
    fn default() -> Self {
        Self::new(
            DeviceClassifier::default(),
            VariantFactory::default(),
            Box::new(DefaultSourceProvider::default()),
        )
    }
}

impl ControllerRegistry {
    pub fn new(
        classifier: DeviceClassifier,
        factory: VariantFactory,
        sources: Box<dyn SourceProvider>,
    ) -> Self {
        Self {
            classifier,
            factory,
            sources,
            render_hook: None,
            controllers: HashMap::new(),
        }
    }

    pub fn set_render_hook(&mut self, hook: Option<Box<dyn ModelRenderHook>>) {
        self.render_hook = hook;
    }

    pub fn classifier(&self) -> &DeviceClassifier {
        &self.classifier
    }

    pub fn factory(&self) -> &VariantFactory {
        &self.factory
    }

    pub fn factory_mut(&mut self) -> &mut VariantFactory {
        &mut self.factory
    }

    /// Cached controller for `raw_device_id`, building it on a miss.
    ///
    /// Returns `None` when the name is no device or construction failed. Failures are
    /// logged and never cached.
    pub fn get_or_create(&mut self, raw_device_id: &str) -> Option<&mut Controller> {
        if !self.controllers.contains_key(raw_device_id) {
            let controller = match self.build(raw_device_id) {
                Ok(Some(controller)) => controller,
                Ok(None) => return None,
                Err(err) => {
                    error!("Unable to create controller `{}`: {}", raw_device_id, err);
                    return None;
                }
            };
            info!(
                "Detected {} controller ({}) as `{}`",
                controller.controller_type(),
                controller.handedness(),
                raw_device_id
            );
            self.controllers.insert(raw_device_id.to_string(), controller);
        }
        self.controllers.get_mut(raw_device_id)
    }

    fn build(&mut self, raw_device_id: &str) -> Result<Option<Controller>> {
        let (controller_type, handedness) = self.classifier.classify(raw_device_id);
        if controller_type == ControllerType::None {
            debug!("`{}` is not a device", raw_device_id);
            return Ok(None);
        }

        let tracking_state = match self.factory.descriptor(controller_type) {
            Some(descriptor) if descriptor.tracked => TrackingState::NotTracked,
            _ => TrackingState::NotApplicable,
        };
        let mut controller =
            self.factory
                .create(raw_device_id, controller_type, handedness, tracking_state, None)?;

        let pointers = self.sources.request_pointers(controller_type, handedness);
        let name = format!("{controller_type} Controller {handedness}");
        let source = self.sources.request_input_source(&name, pointers);
        controller.attach_input_source(source);

        if let Some(hook) = self.render_hook.as_mut() {
            hook.render_model(controller_type, &controller);
        }
        Ok(Some(controller))
    }

    /// Evict a controller. A later lookup rebuilds it from scratch.
    pub fn remove(&mut self, raw_device_id: &str) -> Option<Controller> {
        let removed = self.controllers.remove(raw_device_id);
        if removed.is_some() {
            info!("Removed controller `{}`", raw_device_id);
        }
        removed
    }

    pub fn contains(&self, raw_device_id: &str) -> bool {
        self.controllers.contains_key(raw_device_id)
    }

    pub fn get(&self, raw_device_id: &str) -> Option<&Controller> {
        self.controllers.get(raw_device_id)
    }

    pub fn get_mut(&mut self, raw_device_id: &str) -> Option<&mut Controller> {
        self.controllers.get_mut(raw_device_id)
    }

    pub fn iter(&self) -> impl Iterator<Item = (&String, &Controller)> {
        self.controllers.iter()
    }

    pub fn iter_mut(&mut self) -> impl Iterator<Item = (&String, &mut Controller)> {
        self.controllers.iter_mut()
    }

    /// Raw ids of every registered controller.
    pub fn ids(&self) -> Vec<String> {
        self.controllers.keys().cloned().collect()
    }

    pub fn len(&self) -> usize {
        self.controllers.len()
    }

    pub fn is_empty(&self) -> bool {
        self.controllers.is_empty()
    }

    /// Drop every controller.
    pub fn clear(&mut self) -> Vec<Controller> {
        self.controllers.drain().map(|(_, c)| c).collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::classifier::Handedness;
    use crate::interaction::InteractionMapping;
    use crate::mapping_library as lib;
    use crate::variant::VariantDescriptor;
    use std::sync::{Arc, Mutex};

    fn reject_all(_: Handedness, _: &[InteractionMapping]) -> std::result::Result<(), String> {
        Err("rejected".into())
    }

    struct CountingHook(Arc<Mutex<Vec<ControllerType>>>);

    impl ModelRenderHook for CountingHook {
        fn render_model(&mut self, controller_type: ControllerType, _controller: &Controller) {
            if let Ok(mut seen) = self.0.lock() {
                seen.push(controller_type);
            }
        }
    }

    #[test]
    fn test_builds_source_and_binds_pointers() {
        let mut registry = ControllerRegistry::default();
        let controller = registry
            .get_or_create("Vive Wand Right")
            .expect("controller");

        assert_eq!(controller.controller_type(), ControllerType::ViveWand);
        assert_eq!(controller.tracking_state(), TrackingState::NotTracked);
        let source = controller.input_source().expect("source");
        assert_eq!(source.name, "ViveWand Controller Right");
        assert_eq!(source.pointers.len(), 1);
        assert_eq!(
            source.pointers[0].controller.as_deref(),
            Some("Vive Wand Right")
        );
    }

    #[test]
    fn test_no_device_names_are_ignored() {
        let mut registry = ControllerRegistry::default();
        assert!(registry.get_or_create("").is_none());
        assert!(registry.get_or_create("<0>").is_none());
        assert!(registry.is_empty());
    }

    #[test]
    fn test_render_hook_fires_once_per_build() {
        let seen = Arc::new(Mutex::new(Vec::new()));
        let mut registry = ControllerRegistry::default();
        registry.set_render_hook(Some(Box::new(CountingHook(seen.clone()))));

        registry.get_or_create("Xbox Controller");
        registry.get_or_create("Xbox Controller");
        assert_eq!(*seen.lock().unwrap(), vec![ControllerType::Xbox]);
    }

    #[test]
    fn test_failed_setup_is_not_cached() {
        let mut registry = ControllerRegistry::default();
        registry.factory_mut().register(
            ControllerType::Xbox,
            VariantDescriptor::new("Broken Xbox", lib::xbox).with_validation(reject_all),
        );

        assert!(registry.get_or_create("Xbox Controller").is_none());
        assert!(!registry.contains("Xbox Controller"));

        registry
            .factory_mut()
            .register(ControllerType::Xbox, VariantDescriptor::new("Xbox", lib::xbox));
        assert!(registry.get_or_create("Xbox Controller").is_some());
    }

    #[test]
    fn test_unregistered_type_is_not_inserted() {
        let mut registry = ControllerRegistry::default();
        assert!(registry.factory_mut().unregister(ControllerType::Xbox).is_some());

        assert!(registry.get_or_create("Xbox Controller").is_none());
        assert!(!registry.contains("Xbox Controller"));
        assert!(registry.is_empty());
    }

    #[test]
    fn test_remove_allows_rebuild() {
        let mut registry = ControllerRegistry::default();
        let first = registry
            .get_or_create("Oculus Touch Controller Left")
            .map(|c| c.source_id());
        assert!(registry.remove("Oculus Touch Controller Left").is_some());
        let second = registry
            .get_or_create("Oculus Touch Controller Left")
            .map(|c| c.source_id());
        assert_eq!(first, Some(1));
        assert_eq!(second, Some(2));
    }
}
