use lamp_video::{SourceConfig, SourceKind};
use std::path::PathBuf;

#[test]
fn test_defaults() {
    let config = SourceConfig::default();
    assert_eq!(config.kind(), &SourceKind::Camera("/dev/video0".to_string()));
    assert_eq!(config.width(), 640);
    assert_eq!(config.height(), 480);
    assert_eq!(config.fps(), 30);
    assert_eq!(config.buffer_count(), 4);
}

#[test]
fn test_builder() {
    let config = SourceConfig::camera(2)
        .with_width(320)
        .with_height(240)
        .with_fps(15)
        .with_buffer_count(2);
    assert_eq!(config.kind(), &SourceKind::Camera("/dev/video2".to_string()));
    assert_eq!((config.width(), config.height()), (320, 240));
    assert_eq!(config.fps(), 15);
    assert_eq!(config.buffer_count(), 2);

    let config = SourceConfig::avi("clip.avi").with_device("/dev/video7".to_string());
    assert_eq!(config.kind(), &SourceKind::Camera("/dev/video7".to_string()));
}

#[test]
fn test_from_arg() {
    assert_eq!(
        SourceConfig::from_arg("1").kind(),
        &SourceKind::Camera("/dev/video1".to_string())
    );
    assert_eq!(
        SourceConfig::from_arg("clips/green.avi").kind(),
        &SourceKind::Avi(PathBuf::from("clips/green.avi"))
    );
    let dir = std::env::temp_dir();
    assert_eq!(
        SourceConfig::from_arg(dir.to_str().unwrap()).kind(),
        &SourceKind::Images(dir.clone())
    );
}
