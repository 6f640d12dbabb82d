//! Animation playback.
//!
//! [`animation`] steps every playing [`Animation`] through its clip at the
//! clip's frame rate and copies the current atlas frame into the entity's
//! [`Sprite`].
//!
//! # Animation Flow
//!
//! 1. Clips are registered in [`AnimationStore`] while the scene is built
//! 2. A controller calls [`Animation::play`] or [`Animation::stop`]
//! 3. This system advances the frame index and updates the sprite's source rect
//!
//! Stopped animations are left alone, so whatever frame a controller set on
//! the sprite after stopping stays visible.

use bevy_ecs::prelude::*;
use log::warn;

use crate::components::animation::Animation;
use crate::components::sprite::Sprite;
use crate::resources::animationstore::{AnimationClip, AnimationStore, Repeat};
use crate::resources::atlas::AtlasStore;
use crate::resources::worldtime::WorldTime;

/// Advance playing animations by `WorldTime::delta` and update sprite frames.
pub fn animation(
    mut query: Query<(&mut Animation, &mut Sprite)>,
    animation_store: Res<AnimationStore>,
    atlases: Res<AtlasStore>,
    time: Res<WorldTime>,
) {
    for (mut anim, mut sprite) in query.iter_mut() {
        if !anim.playing {
            continue;
        }
        let Some(key) = anim.animation_key.as_deref() else {
            continue;
        };
        let Some(clip) = animation_store.get(key) else {
            warn!("Animation '{}' is not registered", key);
            anim.stop();
            continue;
        };
        if clip.frames.is_empty() {
            anim.stop();
            continue;
        }

        step(&mut anim, clip, time.delta);

        let frame_name = &clip.frames[anim.frame_index];
        match atlases.frame(&clip.atlas_key, frame_name) {
            Some(frame) => sprite.set_frame(frame),
            None => warn!("Frame '{}' missing from atlas '{}'", frame_name, clip.atlas_key),
        }
    }
}

/// Advance `anim` through `clip` by `dt` seconds.
fn step(anim: &mut Animation, clip: &AnimationClip, dt: f32) {
    let frame_duration = clip.frame_duration();
    let last = clip.frames.len() - 1;
    anim.frame_index = anim.frame_index.min(last);
    anim.elapsed_time += dt;

    while anim.playing && anim.elapsed_time >= frame_duration {
        anim.elapsed_time -= frame_duration;
        if anim.frame_index < last {
            anim.frame_index += 1;
            continue;
        }
        match clip.repeat {
            Repeat::Forever => {
                anim.frame_index = 0;
                anim.repeats_done = anim.repeats_done.saturating_add(1);
            }
            Repeat::Times(n) if anim.repeats_done < n => {
                anim.frame_index = 0;
                anim.repeats_done += 1;
            }
            Repeat::Times(_) => {
                anim.elapsed_time = 0.0;
                anim.playing = false;
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn clip(repeat: Repeat) -> AnimationClip {
        AnimationClip::from_frame_range("atlas", "agv/down/", 1, 4, 4, 10.0, repeat)
    }

    fn playing(key: &str) -> Animation {
        let mut anim = Animation::new();
        anim.play(key, false);
        anim
    }

    #[test]
    fn test_step_advances_one_frame_per_period() {
        let clip = clip(Repeat::Forever);
        let mut anim = playing("agv-down");
        step(&mut anim, &clip, 0.05);
        assert_eq!(anim.frame_index, 0);
        step(&mut anim, &clip, 0.06);
        assert_eq!(anim.frame_index, 1);
        step(&mut anim, &clip, 0.2);
        assert_eq!(anim.frame_index, 3);
    }

    #[test]
    fn test_forever_wraps_around() {
        let clip = clip(Repeat::Forever);
        let mut anim = playing("agv-down");
        step(&mut anim, &clip, 0.45);
        assert_eq!(anim.frame_index, 0);
        assert_eq!(anim.repeats_done, 1);
        assert!(anim.playing);
    }

    #[test]
    fn test_times_stops_on_last_frame() {
        let clip = clip(Repeat::Times(1));
        let mut anim = playing("agv-down");
        // two passes of four frames, then hold
        step(&mut anim, &clip, 1.5);
        assert_eq!(anim.frame_index, 3);
        assert_eq!(anim.repeats_done, 1);
        assert!(!anim.playing);
    }

    #[test]
    fn test_zero_fps_holds_first_frame() {
        let clip = AnimationClip::new("atlas", vec!["a".into(), "b".into()], 0.0, Repeat::Forever);
        let mut anim = playing("still");
        step(&mut anim, &clip, 10.0);
        assert_eq!(anim.frame_index, 0);
    }
}
