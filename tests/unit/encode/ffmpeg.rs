use super::*;

#[test]
fn flatten_premul_alpha_0_returns_bg() {
    let src = vec![0u8, 0, 0, 0];
    let mut dst = vec![0u8; 4];
    flatten_premul_over_bg_to_opaque_rgba8(&mut dst, &src, [10, 20, 30, 255]).unwrap();
    assert_eq!(dst, vec![10, 20, 30, 255]);
}

#[test]
fn flatten_premul_alpha_255_is_identity() {
    let src = vec![1u8, 2, 3, 255];
    let mut dst = vec![0u8; 4];
    flatten_premul_over_bg_to_opaque_rgba8(&mut dst, &src, [10, 20, 30, 255]).unwrap();
    assert_eq!(dst, src);
}

#[test]
fn flatten_rejects_mismatched_buffers() {
    let mut dst = vec![0u8; 8];
    assert!(flatten_premul_over_bg_to_opaque_rgba8(&mut dst, &[0u8; 4], [0, 0, 0, 255]).is_err());
}

#[test]
fn begin_rejects_odd_sizes_before_spawning() {
    let dir = std::env::temp_dir().join("programation-ffmpeg-odd");
    let mut sink = FfmpegSink::new(FfmpegSinkOpts::new(dir.join("x.mp4")));
    let cfg = SinkConfig {
        width: 3,
        height: 2,
        fps: crate::foundation::core::Fps::new(30).unwrap(),
    };
    assert!(matches!(
        sink.begin(cfg).unwrap_err(),
        ProgError::InvalidArgument(_)
    ));
}

#[test]
fn push_before_begin_fails() {
    let mut sink = FfmpegSink::new(FfmpegSinkOpts::default());
    let frame = FrameRGBA {
        width: 2,
        height: 2,
        data: vec![0; 16],
        premultiplied: true,
    };
    assert!(matches!(
        sink.push_frame(0, &frame).unwrap_err(),
        ProgError::Encode(_)
    ));
}

#[test]
fn opts_load_from_partial_json() {
    let opts: FfmpegSinkOpts = serde_json::from_str(r#"{"out_path": "a/b.mp4"}"#).unwrap();
    assert_eq!(opts.out_path, PathBuf::from("a/b.mp4"));
    assert_eq!(opts.crf, 17);
    assert!(opts.overwrite);
}
