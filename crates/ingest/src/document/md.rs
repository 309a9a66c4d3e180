use super::txt::extract_txt;

/// Decode markdown and drop heading markers so `## Setup` reads as `Setup`.
pub fn extract_md(bytes: &[u8]) -> String {
    extract_txt(bytes)
        .lines()
        .map(|line| {
            if line.starts_with('#') {
                line.trim_start_matches('#').trim()
            } else {
                line
            }
        })
        .collect::<Vec<_>>()
        .join("\n")
}
