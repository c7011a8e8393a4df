use super::*;

fn cfg(width: u32, height: u32, fps: u32) -> EncodeConfig {
    EncodeConfig {
        width,
        height,
        fps,
        out_path: PathBuf::from("target/out.mp4"),
        overwrite: true,
    }
}

#[test]
fn config_validation_catches_bad_values() {
    assert!(cfg(0, 10, 30).validate().is_err());
    assert!(cfg(11, 10, 30).validate().is_err());
    assert!(cfg(10, 10, 0).validate().is_err());
    assert!(cfg(10, 10, 30).validate().is_ok());
}

#[test]
fn flatten_premul_over_black_produces_expected_rgb() {
    let src = vec![128u8, 0, 0, 128];
    let mut dst = vec![0u8; 4];
    flatten_to_opaque_rgba8(&mut dst, &src, true, Rgba8::BLACK).unwrap();
    assert_eq!(dst, vec![128, 0, 0, 255]);
}

#[test]
fn flatten_straight_over_black_produces_expected_rgb() {
    let src = vec![255u8, 0, 0, 128];
    let mut dst = vec![0u8; 4];
    flatten_to_opaque_rgba8(&mut dst, &src, false, Rgba8::BLACK).unwrap();
    assert_eq!(dst, vec![128, 0, 0, 255]);
}

#[test]
fn flatten_transparent_shows_background() {
    let src = vec![0u8, 0, 0, 0];
    let mut dst = vec![0u8; 4];
    flatten_to_opaque_rgba8(&mut dst, &src, true, Rgba8::rgb(10, 20, 30)).unwrap();
    assert_eq!(dst, vec![10, 20, 30, 255]);
}

#[test]
fn flatten_rejects_mismatched_buffers() {
    let mut dst = vec![0u8; 8];
    assert!(flatten_to_opaque_rgba8(&mut dst, &[0, 0, 0, 0], true, Rgba8::BLACK).is_err());
}

#[test]
fn push_before_begin_is_an_error() {
    let mut sink = FfmpegSink::new("target/never.mp4", Rgba8::BLACK);
    let frame = FrameRGBA {
        width: 2,
        height: 2,
        data: vec![0; 16],
        premultiplied: true,
    };
    assert!(sink.push_frame(0, &frame).is_err());
    assert!(sink.end().is_ok());
}

#[test]
fn begin_rejects_odd_sizes_before_spawning() {
    let mut sink = FfmpegSink::new("target/odd.mp4", Rgba8::BLACK);
    let err = sink
        .begin(SinkConfig {
            width: 3,
            height: 2,
            fps: 30,
        })
        .unwrap_err();
    assert!(matches!(err, OrreryError::Validation(_)));
}

#[cfg(target_os = "linux")]
#[test]
fn dropping_an_unfinished_sink_reaps_the_encoder() {
    let Ok(mut child) = Command::new("cat")
        .stdin(Stdio::piped())
        .stdout(Stdio::null())
        .stderr(Stdio::null())
        .spawn()
    else {
        return;
    };
    let pid = child.id();
    let stdin = child.stdin.take();
    let mut sink = FfmpegSink::new("target/abandoned.mp4", Rgba8::BLACK);
    sink.running = Some(Running { child, stdin });
    drop(sink);
    std::thread::sleep(std::time::Duration::from_millis(100));

    let status = std::fs::read_to_string(format!("/proc/{pid}/status")).unwrap_or_default();
    assert!(!status.contains("State:\tZ"), "child {pid} left as a zombie");
}
