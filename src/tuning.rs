//! Data-driven game balance
//!
//! Every number that shapes how the game feels lives here so that a host can
//! ship a JSON override without touching the simulation. Distances are in
//! world pixels, times in seconds, horizontal gap values in turns ([0, 1)).

use serde::{Deserialize, Serialize};

use crate::error::TuningError;

/// One step of the combo multiplier ladder
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct ComboTier {
    /// Combo count at which this tier starts
    pub threshold: u32,
    /// Score multiplier while in this tier
    pub multiplier: u32,
}

/// Balance parameters
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Tuning {
    // === Play field ===
    pub field_width: f32,
    pub ball_radius: f32,
    /// Spawn depth (x is always the field center)
    pub spawn_y: f32,
    pub spawn_vy: f32,

    // === Gravity ===
    pub gravity_base: f32,
    /// Added per cleared obstacle
    pub gravity_per_layer: f32,
    pub gravity_max: f32,

    // === Early-game ease-in ===
    /// Seconds at full ease before ramping out
    pub ease_secs: f32,
    /// Seconds to ramp from eased to nominal
    pub ease_ramp_secs: f32,
    /// Gravity scale while eased
    pub ease_gravity_scale: f32,
    /// Extra gap width (turns) while eased
    pub ease_gap_bonus: f32,

    // === Lateral motion ===
    /// Fraction of lateral velocity removed per second
    pub lateral_damping: f32,
    /// Spring pulling the ball back to its drop column (1/s²)
    pub recenter_stiffness: f32,

    // === Bounces ===
    pub restitution: f32,
    /// Below this vertical speed a contact is a rest, not a bounce
    pub rest_speed: f32,

    // === Layout ===
    pub layer_spacing: f32,
    pub first_layer_depth: f32,
    pub layer_thickness: f32,

    // === Gaps ===
    pub gap_start: f32,
    pub gap_shrink_per_layer: f32,
    pub gap_min: f32,
    /// Effective gap width never exceeds this, even with ease bonus
    pub gap_max: f32,

    // === Force fields ===
    pub field_min_index: u32,
    pub field_chance: f32,
    /// Vertical reach of a force field
    pub field_band: f32,
    /// Peak lateral acceleration (px/s²)
    pub field_strength: f32,

    // === Fatal discs ===
    pub fatal_min_index: u32,
    pub fatal_chance: f32,
    /// No fatal discs are rolled during the first seconds of a run
    pub grace_secs: f32,

    // === Scoring ===
    pub base_points: u32,
    pub field_bonus_points: u32,
    pub fatal_bonus_points: u32,
    pub combo_tiers: Vec<ComboTier>,
    pub level_layers: u32,

    // === Speed multiplier (presentation) ===
    pub speed_cap: f32,
    pub speed_gain: f32,
    /// Pass accuracy (0..1) needed for the multiplier to grow
    pub accuracy_threshold: f32,
    /// Decay toward 1.0 per second
    pub speed_decay: f32,

    // === Input ===
    /// Max disc rotation speed (turns/s)
    pub rotate_speed: f32,

    // === Camera ===
    pub view_above: f32,
    pub view_height: f32,
    pub lookahead: f32,
    pub prune_margin: f32,

    // === Phases ===
    pub death_secs: f32,
    pub success_dwell_secs: f32,
    pub tutorial_gravity_scale: f32,
}

impl Default for Tuning {
    fn default() -> Self {
        Self {
            field_width: 320.0,
            ball_radius: 10.0,
            spawn_y: 0.0,
            spawn_vy: 0.0,

            gravity_base: 900.0,
            gravity_per_layer: 12.0,
            gravity_max: 1500.0,

            ease_secs: 3.0,
            ease_ramp_secs: 2.0,
            ease_gravity_scale: 0.6,
            ease_gap_bonus: 0.08,

            lateral_damping: 3.0,
            recenter_stiffness: 6.0,

            restitution: 0.45,
            rest_speed: 60.0,

            layer_spacing: 150.0,
            first_layer_depth: 220.0,
            layer_thickness: 16.0,

            gap_start: 0.32,
            gap_shrink_per_layer: 0.003,
            gap_min: 0.14,
            gap_max: 0.9,

            field_min_index: 8,
            field_chance: 0.2,
            field_band: 120.0,
            field_strength: 700.0,

            fatal_min_index: 15,
            fatal_chance: 0.12,
            grace_secs: 8.0,

            base_points: 10,
            field_bonus_points: 5,
            fatal_bonus_points: 10,
            combo_tiers: vec![
                ComboTier { threshold: 3, multiplier: 2 },
                ComboTier { threshold: 5, multiplier: 3 },
                ComboTier { threshold: 8, multiplier: 5 },
            ],
            level_layers: 10,

            speed_cap: 2.5,
            speed_gain: 0.25,
            accuracy_threshold: 0.5,
            speed_decay: 0.5,

            rotate_speed: 2.5,

            view_above: 120.0,
            view_height: 640.0,
            lookahead: 300.0,
            prune_margin: 60.0,

            death_secs: 1.5,
            success_dwell_secs: 1.2,
            tutorial_gravity_scale: 0.7,
        }
    }
}

impl Tuning {
    /// Parse a (possibly partial) JSON override; missing fields keep defaults
    pub fn from_json(json: &str) -> Result<Self, TuningError> {
        let tuning: Tuning = serde_json::from_str(json)?;
        tuning.validate()?;
        Ok(tuning)
    }

    /// Reject configurations that would make the game unsolvable or unbounded
    pub fn validate(&self) -> Result<(), TuningError> {
        let reals = [
            ("field_width", self.field_width),
            ("ball_radius", self.ball_radius),
            ("spawn_y", self.spawn_y),
            ("spawn_vy", self.spawn_vy),
            ("gravity_base", self.gravity_base),
            ("gravity_per_layer", self.gravity_per_layer),
            ("gravity_max", self.gravity_max),
            ("ease_secs", self.ease_secs),
            ("ease_ramp_secs", self.ease_ramp_secs),
            ("ease_gravity_scale", self.ease_gravity_scale),
            ("ease_gap_bonus", self.ease_gap_bonus),
            ("lateral_damping", self.lateral_damping),
            ("recenter_stiffness", self.recenter_stiffness),
            ("restitution", self.restitution),
            ("rest_speed", self.rest_speed),
            ("layer_spacing", self.layer_spacing),
            ("first_layer_depth", self.first_layer_depth),
            ("layer_thickness", self.layer_thickness),
            ("gap_start", self.gap_start),
            ("gap_shrink_per_layer", self.gap_shrink_per_layer),
            ("gap_min", self.gap_min),
            ("gap_max", self.gap_max),
            ("field_chance", self.field_chance),
            ("field_band", self.field_band),
            ("field_strength", self.field_strength),
            ("fatal_chance", self.fatal_chance),
            ("grace_secs", self.grace_secs),
            ("speed_cap", self.speed_cap),
            ("speed_gain", self.speed_gain),
            ("accuracy_threshold", self.accuracy_threshold),
            ("speed_decay", self.speed_decay),
            ("rotate_speed", self.rotate_speed),
            ("view_above", self.view_above),
            ("view_height", self.view_height),
            ("lookahead", self.lookahead),
            ("prune_margin", self.prune_margin),
            ("death_secs", self.death_secs),
            ("success_dwell_secs", self.success_dwell_secs),
            ("tutorial_gravity_scale", self.tutorial_gravity_scale),
        ];
        if let Some((field, _)) = reals.iter().find(|(_, v)| !v.is_finite()) {
            return Err(TuningError::NonFinite(*field));
        }

        let positive = [
            ("field_width", self.field_width),
            ("ball_radius", self.ball_radius),
            ("gravity_base", self.gravity_base),
            ("gravity_max", self.gravity_max),
            ("layer_spacing", self.layer_spacing),
            ("layer_thickness", self.layer_thickness),
            ("field_band", self.field_band),
            ("rest_speed", self.rest_speed),
            ("rotate_speed", self.rotate_speed),
            ("view_height", self.view_height),
            ("gap_min", self.gap_min),
        ];
        for (field, value) in positive {
            if value <= 0.0 {
                return Err(TuningError::NotPositive { field, value });
            }
        }
        if self.ball_radius * 2.0 >= self.field_width {
            return Err(TuningError::NotPositive {
                field: "field_width - ball diameter",
                value: self.field_width - self.ball_radius * 2.0,
            });
        }

        if self.gap_min >= self.gap_max || self.gap_max >= 1.0 || self.gap_start < self.gap_min {
            return Err(TuningError::GapRange {
                min: self.gap_min,
                max: self.gap_max,
            });
        }

        if self.speed_cap < 1.0 {
            return Err(TuningError::SpeedCap(self.speed_cap));
        }

        for (field, value) in [
            ("field_chance", self.field_chance),
            ("fatal_chance", self.fatal_chance),
            ("restitution", self.restitution),
            ("accuracy_threshold", self.accuracy_threshold),
            ("ease_gravity_scale", self.ease_gravity_scale),
        ] {
            if !(0.0..=1.0).contains(&value) {
                return Err(TuningError::Probability { field, value });
            }
        }

        let ordered = self.combo_tiers.windows(2).all(|w| {
            w[0].threshold < w[1].threshold && w[0].multiplier < w[1].multiplier
        });
        if !ordered || self.combo_tiers.iter().any(|t| t.multiplier == 0) {
            return Err(TuningError::ComboTiers);
        }

        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_is_valid() {
        assert!(Tuning::default().validate().is_ok());
    }

    #[test]
    fn test_partial_json_keeps_defaults() {
        let tuning = Tuning::from_json(r#"{ "gravity_base": 700.0, "grace_secs": 2.0 }"#)
            .expect("partial override should parse");
        assert_eq!(tuning.gravity_base, 700.0);
        assert_eq!(tuning.grace_secs, 2.0);
        assert_eq!(tuning.field_width, Tuning::default().field_width);
    }

    #[test]
    fn test_rejects_zero_gap_floor() {
        let err = Tuning::from_json(r#"{ "gap_min": 0.0 }"#).unwrap_err();
        assert!(matches!(err, TuningError::NotPositive { field: "gap_min", .. }));
    }

    #[test]
    fn test_rejects_unbounded_speed_cap() {
        let tuning = Tuning {
            speed_cap: 0.5,
            ..Tuning::default()
        };
        assert!(matches!(tuning.validate(), Err(TuningError::SpeedCap(_))));
    }

    #[test]
    fn test_rejects_unordered_tiers() {
        let tuning = Tuning {
            combo_tiers: vec![
                ComboTier { threshold: 5, multiplier: 3 },
                ComboTier { threshold: 3, multiplier: 2 },
            ],
            ..Tuning::default()
        };
        assert!(matches!(tuning.validate(), Err(TuningError::ComboTiers)));
    }

    #[test]
    fn test_rejects_bad_json() {
        assert!(matches!(Tuning::from_json("{ nope"), Err(TuningError::Parse(_))));
    }
}
