#[cfg(test)]
mod tests {
    use crate::web::handlers::{content_type_for, video_id_from_upload};

    #[test]
    fn test_video_id_requires_mp4_suffix() {
        assert_eq!(video_id_from_upload("cats.mp4"), Some("cats"));
        assert_eq!(video_id_from_upload("cats.mov"), None);
        assert_eq!(video_id_from_upload("cats"), None);
    }

    #[test]
    fn test_video_id_must_be_a_single_segment() {
        assert_eq!(video_id_from_upload(".mp4"), None);
        assert_eq!(video_id_from_upload("a/b.mp4"), None);
        assert_eq!(video_id_from_upload("a\\b.mp4"), None);
    }

    #[test]
    fn test_manifest_gets_dash_content_type() {
        assert_eq!(content_type_for("manifest.mpd"), "application/dash+xml");
        assert_eq!(content_type_for("init-0.m4s"), "video/m4s");
        assert_eq!(content_type_for("chunk-0-00001.m4s"), "video/m4s");
    }
}
