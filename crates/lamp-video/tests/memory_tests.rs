use lamp_base::{Frame, Rgb};
use lamp_video::{FrameSource, MemorySource, Source, SourceConfig, SourceError};

// Mock implementation for testing
struct CountingSource {
    frame_count: usize,
    limit: usize,
}

impl FrameSource for CountingSource {
    async fn recv(&mut self) -> Result<Option<Frame>, SourceError> {
        if self.frame_count == self.limit {
            return Ok(None);
        }
        self.frame_count += 1;
        Frame::filled(2, 2, Rgb::BLACK)
            .map(Some)
            .map_err(|e| SourceError::Stream(e.to_string()))
    }
}

async fn drain(source: &mut impl FrameSource) -> Result<Vec<Frame>, SourceError> {
    let mut frames = Vec::new();
    while let Some(frame) = source.recv().await? {
        frames.push(frame);
    }
    Ok(frames)
}

#[tokio::test]
async fn test_trait_polymorphism() {
    let mut source = CountingSource {
        frame_count: 0,
        limit: 3,
    };
    let frames = drain(&mut source).await.unwrap();
    assert_eq!(frames.len(), 3);
    assert_eq!(source.frame_count, 3);
}

#[tokio::test]
async fn test_memory_source_plays_in_order() {
    let clip = vec![
        Frame::filled(2, 1, Rgb::RED).unwrap(),
        Frame::filled(2, 1, Rgb::GREEN).unwrap(),
    ];
    let mut source = MemorySource::new(clip.clone());
    source.push(Frame::filled(2, 1, Rgb::BLUE).unwrap());
    assert_eq!(source.remaining(), 3);

    let frames = drain(&mut source).await.unwrap();
    assert_eq!(&frames[..2], &clip[..]);
    assert_eq!(frames[2].pixel(0, 0), Rgb::BLUE);
    assert_eq!(source.remaining(), 0);
    assert!(source.recv().await.unwrap().is_none());
}

#[tokio::test]
async fn test_source_wraps_memory() {
    let mut source = Source::from(MemorySource::from(vec![Frame::filled(1, 1, Rgb::WHITE).unwrap()]));
    assert_eq!(drain(&mut source).await.unwrap().len(), 1);
}

#[cfg(not(feature = "v4l2"))]
#[tokio::test]
async fn test_camera_needs_feature() {
    let err = Source::open(&SourceConfig::camera(0)).await.unwrap_err();
    assert!(matches!(err, SourceError::Device(_)));
    assert!(err.to_string().contains("v4l2"));
}
