use std::path::PathBuf;

/// Name used when the asset URL has no usable path segment.
pub const DEFAULT_ASSET_NAME: &str = "model.glb";

/// Extension forced onto every saved asset.
pub const ASSET_EXTENSION: &str = "glb";

/// Derive a local file name from an asset URL's final path segment. The
/// result never contains path separators and always ends in `.glb`.
pub fn file_name_from_url(url: &str) -> String {
    let path = url.split(['?', '#']).next().unwrap_or(url);

    let (had_scheme, rest) = match path.split_once("://") {
        Some((_, rest)) => (true, rest),
        None => (false, path),
    };
    let segment = match rest.split_once('/') {
        Some((_, p)) => p.rsplit('/').next().unwrap_or(""),
        None if had_scheme => "",
        None => rest,
    };

    let decoded = urlencoding::decode(segment)
        .map(|c| c.into_owned())
        .unwrap_or_else(|_| segment.to_string());

    // Decoding may smuggle separators back in; keep only the last piece.
    let name = decoded.rsplit(['/', '\\']).next().unwrap_or("").trim();
    if name.is_empty() || name == "." || name == ".." {
        return DEFAULT_ASSET_NAME.to_string();
    }

    let mut file = PathBuf::from(name);
    file.set_extension(ASSET_EXTENSION);
    file.to_string_lossy().into_owned()
}

/// Directory downloads land in when no destination is given.
pub fn default_download_dir() -> PathBuf {
    dirs::download_dir().unwrap_or_else(|| PathBuf::from("."))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_name_from_asset_url() {
        assert_eq!(
            file_name_from_url("https://cdn.example.com/assets/scene.glb"),
            "scene.glb"
        );
    }

    #[test]
    fn test_extension_is_forced() {
        assert_eq!(
            file_name_from_url("https://cdn.example.com/assets/scene.gltf"),
            "scene.glb"
        );
        assert_eq!(
            file_name_from_url("https://cdn.example.com/assets/scene"),
            "scene.glb"
        );
    }

    #[test]
    fn test_query_and_fragment_ignored() {
        assert_eq!(
            file_name_from_url("https://cdn.example.com/a/model.glb?Expires=1#frag"),
            "model.glb"
        );
    }

    #[test]
    fn test_fallback_when_no_segment() {
        assert_eq!(file_name_from_url("https://cdn.example.com/"), DEFAULT_ASSET_NAME);
        assert_eq!(file_name_from_url("https://cdn.example.com"), DEFAULT_ASSET_NAME);
    }

    #[test]
    fn test_encoded_segment_is_decoded() {
        assert_eq!(
            file_name_from_url("https://cdn.example.com/a/my%20scene.glb"),
            "my scene.glb"
        );
    }

    #[test]
    fn test_separators_cannot_escape() {
        assert_eq!(
            file_name_from_url("https://cdn.example.com/a/..%2Fsecret"),
            "secret.glb"
        );
        assert_eq!(file_name_from_url("https://cdn.example.com/a/%2e%2e"), DEFAULT_ASSET_NAME);
    }
}
