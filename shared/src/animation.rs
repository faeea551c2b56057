//! Minimal named-animation controller.
//!
//! Tracks per-animation weight fades, playback speed and time so a renderer can pose
//! a model from it. Blending itself is left to whoever reads the weights.

use std::collections::BTreeMap;

use crate::handles::AnimationHandle;

#[derive(Clone, Copy, Debug, PartialEq)]
pub struct AnimationPlayback {
    pub track: u8,
    pub looped: bool,
    /// Current blend weight in `[0, 1]`.
    pub weight: f32,
    pub target_weight: f32,
    /// Seconds to go from the current weight to the target. Zero snaps.
    pub fade_time: f32,
    pub speed: f32,
    /// Playback position in seconds.
    pub time: f32,
}

impl AnimationPlayback {
    fn new(track: u8, looped: bool) -> Self {
        Self {
            track,
            looped,
            weight: 0.0,
            target_weight: 0.0,
            fade_time: 0.0,
            speed: 1.0,
            time: 0.0,
        }
    }

    fn fade_to(&mut self, target_weight: f32, fade_time: f32) {
        self.target_weight = target_weight.clamp(0.0, 1.0);
        self.fade_time = fade_time.max(0.0);
    }
}

#[derive(Clone, Debug)]
pub struct AnimationController {
    playing: BTreeMap<String, AnimationPlayback>,
    /// Length of every animation (seconds) used for looping.
    cycle_length: f32,
}

impl AnimationController {
    pub fn new(cycle_length: f32) -> Self {
        Self {
            playing: BTreeMap::new(),
            cycle_length: cycle_length.max(f32::EPSILON),
        }
    }

    pub fn get(&self, name: &str) -> Option<&AnimationPlayback> {
        self.playing.get(name)
    }

    /// Fading in, fully on, or not yet faded out.
    pub fn is_playing(&self, name: &str) -> bool {
        self.playing.get(name).is_some_and(|p| p.target_weight > 0.0)
    }

    pub fn weight(&self, name: &str) -> f32 {
        self.playing.get(name).map_or(0.0, |p| p.weight)
    }

    pub fn time(&self, name: &str) -> f32 {
        self.playing.get(name).map_or(0.0, |p| p.time)
    }

    /// Advance fades and playback time. Fully faded-out animations are dropped.
    pub fn update(&mut self, dt_seconds: f32) {
        let dt = dt_seconds.max(0.0);
        let cycle = self.cycle_length;

        for playback in self.playing.values_mut() {
            let delta = playback.target_weight - playback.weight;
            if playback.fade_time <= 0.0 {
                playback.weight = playback.target_weight;
            } else {
                let step = dt / playback.fade_time;
                playback.weight += delta.clamp(-step, step);
            }

            playback.time += dt * playback.speed;
            if playback.looped {
                playback.time = playback.time.rem_euclid(cycle);
            } else {
                playback.time = playback.time.clamp(0.0, cycle);
            }
        }

        self.playing
            .retain(|_, p| p.weight > 0.0 || p.target_weight > 0.0);
    }
}

impl AnimationHandle for AnimationController {
    fn play_exclusive(&mut self, name: &str, track: u8, looped: bool, blend_time: f32) {
        for (other, playback) in self.playing.iter_mut() {
            if other != name && playback.track == track {
                playback.fade_to(0.0, blend_time);
            }
        }

        let playback = self
            .playing
            .entry(name.to_string())
            .or_insert_with(|| AnimationPlayback::new(track, looped));
        playback.track = track;
        playback.looped = looped;
        playback.fade_to(1.0, blend_time);
    }

    fn stop(&mut self, name: &str, blend_time: f32) {
        if let Some(playback) = self.playing.get_mut(name) {
            playback.fade_to(0.0, blend_time);
        }
    }

    fn set_speed(&mut self, name: &str, speed: f32) {
        if let Some(playback) = self.playing.get_mut(name) {
            playback.speed = speed;
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const WALK: &str = "walk";
    const IDLE: &str = "idle";

    #[test]
    fn play_fades_in_over_blend_time() {
        let mut anim = AnimationController::new(1.0);
        anim.play_exclusive(WALK, 0, true, 0.2);
        assert!(anim.is_playing(WALK));
        assert_eq!(anim.weight(WALK), 0.0);

        anim.update(0.1);
        assert!((anim.weight(WALK) - 0.5).abs() < 1.0e-5);

        anim.update(0.2);
        assert_eq!(anim.weight(WALK), 1.0);
    }

    #[test]
    fn stop_fades_out_and_drops_animation() {
        let mut anim = AnimationController::new(1.0);
        anim.play_exclusive(WALK, 0, true, 0.0);
        anim.update(0.016);
        assert_eq!(anim.weight(WALK), 1.0);

        anim.stop(WALK, 0.2);
        assert!(!anim.is_playing(WALK));
        anim.update(0.1);
        assert!(anim.get(WALK).is_some());

        anim.update(0.2);
        assert!(anim.get(WALK).is_none());
    }

    #[test]
    fn play_exclusive_fades_out_same_track_only() {
        let mut anim = AnimationController::new(1.0);
        anim.play_exclusive(IDLE, 0, true, 0.0);
        anim.play_exclusive("wave", 1, false, 0.0);
        anim.update(0.016);

        anim.play_exclusive(WALK, 0, true, 0.0);
        anim.update(0.016);

        assert!(anim.get(IDLE).is_none());
        assert_eq!(anim.weight("wave"), 1.0);
        assert_eq!(anim.weight(WALK), 1.0);
    }

    #[test]
    fn looped_time_wraps_and_speed_scales() {
        let mut anim = AnimationController::new(1.0);
        anim.play_exclusive(WALK, 0, true, 0.0);
        anim.set_speed(WALK, 2.0);
        anim.update(0.75);

        assert!((anim.time(WALK) - 0.5).abs() < 1.0e-5);
    }

    #[test]
    fn speed_of_unknown_animation_is_ignored() {
        let mut anim = AnimationController::new(1.0);
        anim.set_speed(WALK, 3.0);
        anim.stop(WALK, 0.2);
        assert!(anim.get(WALK).is_none());
    }
}
