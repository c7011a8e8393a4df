use super::*;

fn frame(v: u8) -> FrameRGBA {
    FrameRGBA {
        width: 1,
        height: 1,
        data: vec![v, v, v, 255],
        premultiplied: true,
    }
}

#[test]
fn in_memory_sink_keeps_frames_in_order() {
    let mut sink = InMemorySink::new();
    let cfg = SinkConfig {
        width: 1,
        height: 1,
        fps: 30,
    };
    sink.begin(cfg).unwrap();
    sink.push_frame(0, &frame(1)).unwrap();
    sink.push_frame(1, &frame(2)).unwrap();
    sink.end().unwrap();

    assert_eq!(sink.config(), Some(cfg));
    assert!(sink.is_ended());
    let idx: Vec<u64> = sink.frames.iter().map(|(i, _)| *i).collect();
    assert_eq!(idx, vec![0, 1]);
    assert_eq!(sink.frames[1].1.data[0], 2);
}

#[test]
fn begin_clears_previous_sequence() {
    let mut sink = InMemorySink::new();
    let cfg = SinkConfig {
        width: 1,
        height: 1,
        fps: 30,
    };
    sink.begin(cfg).unwrap();
    sink.push_frame(0, &frame(1)).unwrap();
    sink.end().unwrap();

    sink.begin(cfg).unwrap();
    assert!(sink.frames.is_empty());
    assert!(!sink.is_ended());
}
