use rv_inference::{KeywordGenerator, VideoScorer};
use rv_search::VideoSearch;

pub struct AppState {
    pub keywords: KeywordGenerator,
    pub search: VideoSearch,
    pub scorer: VideoScorer,
}
