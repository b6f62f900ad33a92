//! Audio backend using HTML media elements
//!
//! One `HtmlAudioElement` per cue. Browsers reject `play()` until the page
//! has seen a user gesture; those rejections are swallowed.

use wasm_bindgen_futures::JsFuture;
use web_sys::HtmlAudioElement;

use crate::feedback::{Cue, CuePlayer};

/// Cue player backed by `<audio>` elements
pub struct WebCuePlayer {
    flap: Option<HtmlAudioElement>,
    collect: Option<HtmlAudioElement>,
    game_over: Option<HtmlAudioElement>,
    hit: Option<HtmlAudioElement>,
}

impl WebCuePlayer {
    /// Create elements for every cue, loading assets relative to `base_url`
    pub fn new(base_url: &str) -> Self {
        let load = |cue: Cue| {
            let url = format!("{}{}", base_url, cue.file_name());
            let el = HtmlAudioElement::new_with_src(&url).ok();
            if el.is_none() {
                log::warn!("Failed to create audio element for {url} - cue disabled");
            }
            el
        };
        Self {
            flap: load(Cue::Flap),
            collect: load(Cue::Collect),
            game_over: load(Cue::GameOver),
            hit: load(Cue::Hit),
        }
    }

    fn element(&self, cue: Cue) -> Option<&HtmlAudioElement> {
        match cue {
            Cue::Flap => self.flap.as_ref(),
            Cue::Collect => self.collect.as_ref(),
            Cue::GameOver => self.game_over.as_ref(),
            Cue::Hit => self.hit.as_ref(),
        }
    }

    /// Start playback, discarding a rejected promise
    fn start(el: &HtmlAudioElement) {
        if let Ok(promise) = el.play() {
            wasm_bindgen_futures::spawn_local(async move {
                JsFuture::from(promise).await.ok();
            });
        }
    }
}

impl CuePlayer for WebCuePlayer {
    fn play_from_start(&mut self, cue: Cue) {
        if let Some(el) = self.element(cue) {
            el.set_muted(false);
            el.set_current_time(0.0);
            Self::start(el);
        }
    }

    fn pause(&mut self, cue: Cue) {
        if let Some(el) = self.element(cue) {
            el.pause().ok();
        }
    }

    fn rewind(&mut self, cue: Cue) {
        if let Some(el) = self.element(cue) {
            el.set_current_time(0.0);
        }
    }

    fn set_loop(&mut self, cue: Cue, looping: bool) {
        if let Some(el) = self.element(cue) {
            el.set_loop(looping);
        }
    }

    fn set_volume(&mut self, cue: Cue, volume: f32) {
        if let Some(el) = self.element(cue) {
            el.set_volume(f64::from(volume.clamp(0.0, 1.0)));
        }
    }

    fn is_paused(&self, cue: Cue) -> bool {
        self.element(cue).is_none_or(|el| el.paused())
    }

    /// Play each cue muted and stop it straight away so later playback is
    /// allowed outside gesture handlers
    fn unlock(&mut self) {
        for cue in Cue::ALL {
            let Some(el) = self.element(cue).cloned() else {
                continue;
            };
            el.set_muted(true);
            let Ok(promise) = el.play() else {
                el.set_muted(false);
                continue;
            };
            wasm_bindgen_futures::spawn_local(async move {
                JsFuture::from(promise).await.ok();
                // Still muted means no real playback claimed it meanwhile
                if el.muted() {
                    el.pause().ok();
                    el.set_current_time(0.0);
                    el.set_muted(false);
                }
            });
        }
    }
}
