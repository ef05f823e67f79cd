use xrinput::mapping_library as lib;
use xrinput::{
    classify, Controller, ControllerManager, ControllerRegistry, ControllerType, EngineConfig,
    Handedness, InputEvent, InputKind, InteractionMapping, MappingProfile, VariantDescriptor,
    VirtualInput,
};

fn always_reject(_: Handedness, _: &[InteractionMapping]) -> Result<(), String> {
    Err("layout rejected".into())
}

#[test]
fn test_classification() {
    assert_eq!(
        classify("Oculus Touch Controller Left"),
        (ControllerType::OculusTouch, Handedness::Left)
    );
    assert_eq!(classify(""), (ControllerType::None, Handedness::None));
    // Both patterns match; the earlier one wins.
    assert_eq!(
        classify("Oculus Touch via Xbox Controller Right"),
        (ControllerType::OculusTouch, Handedness::Right)
    );
}

#[test]
fn test_get_or_create_is_idempotent() {
    let mut registry = ControllerRegistry::default();
    let first = registry
        .get_or_create("Vive Wand Left")
        .map(|c| c as *const Controller);
    let again = registry
        .get_or_create("Vive Wand Left")
        .map(|c| c as *const Controller);
    let other = registry
        .get_or_create("Vive Wand Right")
        .map(|c| c as *const Controller);

    assert!(first.is_some());
    assert_eq!(first, again);
    assert_ne!(first, other);
    assert_eq!(registry.len(), 2);
}

#[test]
fn test_setup_failure_is_retried() {
    let mut registry = ControllerRegistry::default();
    registry.factory_mut().register(
        ControllerType::ViveWand,
        VariantDescriptor::motion_controller("Vive Wand", lib::vive_wand)
            .with_validation(always_reject),
    );

    assert!(registry.get_or_create("Vive Wand Left").is_none());
    assert!(registry.get("Vive Wand Left").is_none());

    registry.factory_mut().register(
        ControllerType::ViveWand,
        VariantDescriptor::motion_controller("Vive Wand", lib::vive_wand),
    );
    assert!(registry.get_or_create("Vive Wand Left").is_some());
}

#[test]
fn test_manager_reconnect_rebuilds_controller() {
    let mut manager = ControllerManager::new(&EngineConfig::default(), VirtualInput::new());
    manager.input_mut().connect("Oculus Touch Controller Right");
    let mut events: Vec<InputEvent> = Vec::new();

    manager.tick_into(&mut events);
    manager.input_mut().disconnect("Oculus Touch Controller Right");
    manager.tick_into(&mut events);
    manager.input_mut().connect("Oculus Touch Controller Right");
    manager.tick_into(&mut events);

    let sources: Vec<(u32, bool)> = events
        .iter()
        .filter(|e| e.kind.is_source())
        .map(|e| (e.source_id, matches!(e.kind, InputKind::SourceDetected { .. })))
        .collect();
    assert_eq!(sources, vec![(1, true), (1, false), (2, true)]);
}

#[test]
fn test_profile_layout_from_config() {
    let config = EngineConfig::from_toml_str(
        r#"
        [profile]
        name = "Arcade"

        [[profile.controllers]]
        controller_type = "GenericUnity"
        handedness = "None"

        [[profile.controllers.interactions]]
        id = 0
        description = "Coin"
        axis = "Digital"
        input = "ButtonPress"
        key = 3
        action = { id = 1, description = "Insert Coin" }
        "#,
    )
    .expect("config");
    assert_eq!(config.profile.as_ref().map(|p| p.name.as_str()), Some("Arcade"));

    let mut config = config;
    config.fallback_type = ControllerType::GenericUnity;
    let mut manager = ControllerManager::new(&config, VirtualInput::new());
    manager.input_mut().connect("Arcade Stick");
    manager.input_mut().press_key(lib::button(3));
    let mut events: Vec<InputEvent> = Vec::new();
    manager.tick_into(&mut events);

    let down = events
        .iter()
        .find(|e| e.kind == InputKind::Down)
        .expect("down");
    assert_eq!(down.action.description, "Insert Coin");
    assert!(manager.snapshot().get("Arcade Stick").expect("state").get_bool("Coin"));
}

#[test]
fn test_unconfigured_controller_is_disabled() {
    let config = EngineConfig {
        fallback_type: ControllerType::GenericUnity,
        profile: Some(MappingProfile::new("empty")),
        ..EngineConfig::default()
    };
    let mut manager = ControllerManager::new(&config, VirtualInput::new());
    manager.input_mut().connect("Arcade Stick");
    manager.tick();

    let snap = manager.snapshot();
    assert!(!snap.get("Arcade Stick").expect("state").enabled);
}

#[test]
fn test_unrecognised_unhanded_device_is_detected_once() {
    let mut manager = ControllerManager::new(&EngineConfig::default(), VirtualInput::new());
    manager.input_mut().connect("Acme Motion Device");
    let mut events: Vec<InputEvent> = Vec::new();

    for _ in 0..3 {
        manager.tick_into(&mut events);
    }

    let detected: Vec<&InputEvent> = events
        .iter()
        .filter(|e| matches!(e.kind, InputKind::SourceDetected { .. }))
        .collect();
    assert_eq!(detected.len(), 1);
    assert_eq!(
        detected[0].kind,
        InputKind::SourceDetected {
            name: "GenericOpenVR Controller None".into()
        }
    );
    assert_eq!(manager.registry().len(), 1);
    let controller = manager.registry().get("Acme Motion Device").expect("controller");
    assert_eq!(controller.controller_type(), ControllerType::GenericOpenVR);
    assert!(controller.enabled());
}
