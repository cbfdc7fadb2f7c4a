//! Matcap texture sources.

/// Matcaps requested at startup, in submission order.
pub const DEFAULT_MATCAP_URLS: [&str; 7] = [
    "https://ksenia-k.com/img/threejs/matcaps/1.png",
    "https://ksenia-k.com/img/threejs/matcaps/2.png",
    "https://ksenia-k.com/img/threejs/matcaps/3.png",
    "https://ksenia-k.com/img/threejs/matcaps/4.png",
    "https://ksenia-k.com/img/threejs/matcaps/5.png",
    "https://ksenia-k.com/img/threejs/matcaps/6.png",
    "https://ksenia-k.com/img/threejs/matcaps/7.png",
];

/// Texture request list and the slot that becomes the active matcap
#[derive(Debug, Clone)]
pub struct MatcapSources {
    /// URLs or local file paths, in submission order
    pub sources: Vec<String>,

    /// Submission index whose completion activates the matcap
    pub active_slot: usize,
}

impl Default for MatcapSources {
    fn default() -> Self {
        Self {
            sources: DEFAULT_MATCAP_URLS.iter().map(|s| s.to_string()).collect(),
            active_slot: 5,
        }
    }
}
