use burn::backend::NdArray;
use fointern_net::{FoInternNet, FoInternNetConfig, NetworkError};

#[test]
fn config_survives_json_file() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("fointern_net.json");

    let config = FoInternNetConfig::new(128, 6)
        .with_in_channels(1)
        .with_base_channels(16);
    config.to_file(&path).unwrap();

    let loaded = FoInternNetConfig::from_file(&path).unwrap();

    assert_eq!(loaded.input_size, 128);
    assert_eq!(loaded.num_classes, 6);
    assert_eq!(loaded.in_channels, 1);
    assert_eq!(loaded.stage_channels(), [16, 32, 64, 128]);

    let model: FoInternNet<NdArray> = loaded.init(&Default::default());
    assert_eq!(model.num_classes(), 6);
}

#[test]
fn missing_config_file_is_an_error() {
    let dir = tempfile::tempdir().unwrap();

    let result = FoInternNetConfig::from_file(dir.path().join("absent.json"));

    assert!(matches!(result, Err(NetworkError::Config(_))));
}
