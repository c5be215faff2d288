use std::fmt::Write;
use rv_core::ScoredVideo;

pub fn parse_ingredients(list: &str) -> Vec<String> {
    list.split(',')
        .map(str::trim)
        .filter(|item| !item.is_empty())
        .map(str::to_string)
        .collect()
}

pub fn render(videos: &[ScoredVideo]) -> String {
    if videos.is_empty() {
        return "No matching videos found.\n".to_string();
    }

    let mut out = String::new();
    for (rank, scored) in videos.iter().enumerate() {
        let video = &scored.video;
        let _ = writeln!(out, "{:>2}. [{:>3}] {}", rank + 1, scored.score, video.title);
        let _ = writeln!(out, "          {} · {}", video.channel_title, video.published_at.format("%Y-%m-%d"));
        let _ = writeln!(out, "          {}", scored.reason);
        let _ = writeln!(out, "          {}", video.url);
    }
    out
}
