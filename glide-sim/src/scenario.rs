//! Definitions of the motion to simulate.

use std::fs::File;
use std::io;
use std::path::Path;

use anyhow::Context as _;

use glide::math::{PositiveSign, ZeroOne, zo64};
use glide::{BodyParams, DEFAULT_REST_EPSILON};

// -------------------------------------------------------------------------------------------------

/// The largest number of coasting steps a [`Scenario`] may take, since every step produces
/// a sample.
pub const MAX_STEPS: u64 = 1_000_000;

/// The initial state of a body, and the events which happen to it.
///
/// Times are in seconds from the start of the scenario; velocities are in position units
/// per second.
///
/// A scenario runs in two phases. First, the body is dragged through each of the
/// [`drag`](Self::drag) samples, acquiring the velocity of the drag. Then, the body is
/// released and coasts in steps of [`time_step`](Self::time_step) until
/// [`duration`](Self::duration) has passed, receiving each of the
/// [`impulses`](Self::impulses) at the start of the first step on or after its time.
#[derive(Clone, Debug, PartialEq, serde::Deserialize, serde::Serialize)]
#[serde(deny_unknown_fields)]
#[non_exhaustive]
pub struct Scenario {
    /// Initial position. Its length determines the number of dimensions.
    pub position: Vec<f64>,

    /// Initial velocity. Zero if absent.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub velocity: Option<Vec<f64>>,

    /// Friction coefficient of the body.
    pub friction: ZeroOne,

    /// Rest threshold of the body.
    #[serde(default = "default_rest_epsilon")]
    pub rest_epsilon: PositiveSign,

    /// Time between samples while coasting.
    #[serde(default = "default_time_step")]
    pub time_step: f64,

    /// Time at which to stop.
    pub duration: f64,

    /// Whether to stop before `duration` if the body comes to rest.
    #[serde(default)]
    pub stop_at_rest: bool,

    /// Changes of velocity while coasting.
    #[serde(default)]
    pub impulses: Vec<Impulse>,

    /// Positions the body is dragged to before it coasts, in increasing time order.
    #[serde(default)]
    pub drag: Vec<DragSample>,
}

/// An instantaneous change of velocity in a [`Scenario`].
#[derive(Clone, Debug, PartialEq, serde::Deserialize, serde::Serialize)]
#[serde(deny_unknown_fields)]
#[expect(clippy::exhaustive_structs)]
pub struct Impulse {
    /// Time at which to apply the impulse.
    pub at: f64,
    /// Amount to add to the velocity.
    pub impulse: Vec<f64>,
}

/// A pointer position reported while dragging the body in a [`Scenario`].
#[derive(Clone, Debug, PartialEq, serde::Deserialize, serde::Serialize)]
#[serde(deny_unknown_fields)]
#[expect(clippy::exhaustive_structs)]
pub struct DragSample {
    /// Time at which the body is at `position`.
    pub at: f64,
    /// Position of the body.
    pub position: Vec<f64>,
}

fn default_rest_epsilon() -> PositiveSign {
    DEFAULT_REST_EPSILON
}

fn default_time_step() -> f64 {
    1.0
}

impl Scenario {
    /// Reads a scenario in JSON format from the file at `path`, or from standard input if
    /// `path` is `-`.
    pub fn load(path: &Path) -> Result<Self, anyhow::Error> {
        if path == Path::new("-") {
            Self::from_reader(io::stdin().lock())
                .context("failed to read scenario from standard input")
        } else {
            let file = File::open(path)
                .with_context(|| format!("failed to open scenario file {}", path.display()))?;
            Self::from_reader(io::BufReader::new(file))
                .with_context(|| format!("failed to read scenario file {}", path.display()))
        }
    }

    /// Reads a scenario in JSON format.
    ///
    /// The scenario is not [validated](Self::validate).
    pub fn from_reader(reader: impl io::Read) -> Result<Self, anyhow::Error> {
        Ok(serde_json::from_reader(reader)?)
    }

    /// Returns the parameters of the body to simulate.
    pub fn params(&self) -> BodyParams {
        BodyParams::new(self.friction).with_rest_epsilon(self.rest_epsilon)
    }

    /// Checks the timing of the scenario, including that it takes no more than
    /// [`MAX_STEPS`] steps.
    ///
    /// Vector lengths are not checked here; a mismatch is reported by the body when the
    /// vector is used.
    pub fn validate(&self) -> Result<(), anyhow::Error> {
        let &Self {
            position: _,
            velocity: _,
            friction: _,
            rest_epsilon: _,
            time_step,
            duration,
            stop_at_rest: _,
            ref impulses,
            ref drag,
        } = self;

        if !(time_step > 0.0 && time_step.is_finite()) {
            anyhow::bail!("time step must be positive and finite, not {time_step}");
        }
        if !(duration >= 0.0 && duration.is_finite()) {
            anyhow::bail!("duration must be non-negative and finite, not {duration}");
        }
        if duration / time_step > MAX_STEPS as f64 {
            anyhow::bail!(
                "duration {duration} at time step {time_step} would take more than \
                {MAX_STEPS} steps"
            );
        }
        if let Some(impulse) = impulses.iter().find(|impulse| !impulse.at.is_finite()) {
            anyhow::bail!("impulse time must be finite, not {}", impulse.at);
        }
        let mut previous_drag_time = 0.0;
        for sample in drag {
            if !(sample.at >= previous_drag_time && sample.at.is_finite()) {
                anyhow::bail!(
                    "drag sample times must be finite and increase from zero; \
                    {} follows {previous_drag_time}",
                    sample.at
                );
            }
            previous_drag_time = sample.at;
        }
        Ok(())
    }
}

// -------------------------------------------------------------------------------------------------

/// Scenarios which can be run without a scenario file.
#[derive(
    Clone,
    Copy,
    Debug,
    Eq,
    Hash,
    PartialEq,
    clap::ValueEnum,
    strum::EnumIter,
    strum::EnumString,
    strum::IntoStaticStr,
)]
#[strum(serialize_all = "kebab-case")]
#[non_exhaustive]
pub enum BuiltinScenario {
    /// Two-dimensional motion with light friction.
    #[value(help = "2-D motion with light friction, sampled every second")]
    Glide,
    /// One-dimensional motion with a push after one second.
    #[value(help = "1-D motion receiving an impulse after one second")]
    Impulse,
    /// Three-dimensional motion with heavy friction.
    #[value(help = "3-D motion with heavy friction, stopping if it comes to rest")]
    Halt,
    /// A drag gesture followed by release.
    #[value(help = "A 2-D drag gesture, then release and coasting")]
    Fling,
}

impl BuiltinScenario {
    /// Returns the definition of this scenario.
    pub fn scenario(self) -> Scenario {
        let base = Scenario {
            position: vec![0.0, 0.0],
            velocity: None,
            friction: zo64(0.9),
            rest_epsilon: DEFAULT_REST_EPSILON,
            time_step: 1.0,
            duration: 5.0,
            stop_at_rest: false,
            impulses: vec![],
            drag: vec![],
        };
        match self {
            BuiltinScenario::Glide => Scenario {
                velocity: Some(vec![10.0, 5.0]),
                ..base
            },
            BuiltinScenario::Impulse => Scenario {
                position: vec![0.0],
                velocity: Some(vec![5.0]),
                friction: zo64(0.95),
                duration: 4.0,
                impulses: vec![Impulse {
                    at: 1.0,
                    impulse: vec![3.0],
                }],
                ..base
            },
            BuiltinScenario::Halt => Scenario {
                position: vec![0.0, 0.0, 0.0],
                velocity: Some(vec![10.0, 0.0, 5.0]),
                friction: zo64(0.7),
                time_step: 0.5,
                duration: 20.0,
                stop_at_rest: true,
                ..base
            },
            BuiltinScenario::Fling => Scenario {
                // Pointer events at 60 Hz, moving right and slightly down.
                drag: (1..=4u8)
                    .map(|i| DragSample {
                        at: f64::from(i) * 0.016,
                        position: vec![f64::from(i) * 4.0, f64::from(i)],
                    })
                    .collect(),
                friction: zo64(0.05),
                time_step: 0.25,
                duration: 3.0,
                ..base
            },
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use glide::math::ps64;
    use pretty_assertions::assert_eq;
    use std::io::Write as _;
    use strum::IntoEnumIterator as _;

    #[test]
    fn builtins_are_valid() {
        for builtin in BuiltinScenario::iter() {
            let scenario = builtin.scenario();
            scenario.validate().unwrap();
            let dimension = scenario.position.len();
            if let Some(velocity) = &scenario.velocity {
                assert_eq!(velocity.len(), dimension, "{builtin:?}");
            }
            for impulse in &scenario.impulses {
                assert_eq!(impulse.impulse.len(), dimension, "{builtin:?}");
            }
            for sample in &scenario.drag {
                assert_eq!(sample.position.len(), dimension, "{builtin:?}");
            }
        }
    }

    #[test]
    fn builtin_names() {
        assert_eq!(<&str>::from(BuiltinScenario::Glide), "glide");
        assert_eq!(
            "fling".parse::<BuiltinScenario>().unwrap(),
            BuiltinScenario::Fling
        );
    }

    #[test]
    fn parse_with_defaults() {
        let scenario =
            Scenario::from_reader(r#"{"position": [1, 2], "friction": 0.5, "duration": 3}"#.as_bytes())
                .unwrap();
        assert_eq!(
            scenario,
            Scenario {
                position: vec![1.0, 2.0],
                velocity: None,
                friction: zo64(0.5),
                rest_epsilon: DEFAULT_REST_EPSILON,
                time_step: 1.0,
                duration: 3.0,
                stop_at_rest: false,
                impulses: vec![],
                drag: vec![],
            }
        );
    }

    #[test]
    fn parse_everything() {
        let scenario = Scenario::from_reader(
            r#"{
                "position": [0],
                "velocity": [2],
                "friction": 1,
                "rest_epsilon": 0.001,
                "time_step": 0.5,
                "duration": 2,
                "stop_at_rest": true,
                "impulses": [{"at": 1, "impulse": [-1]}],
                "drag": [{"at": 0.25, "position": [3]}]
            }"#
            .as_bytes(),
        )
        .unwrap();
        assert_eq!(scenario.params(), BodyParams::new(zo64(1.0)).with_rest_epsilon(ps64(0.001)));
        assert_eq!(
            scenario.impulses,
            vec![Impulse {
                at: 1.0,
                impulse: vec![-1.0]
            }]
        );
        assert_eq!(
            scenario.drag,
            vec![DragSample {
                at: 0.25,
                position: vec![3.0]
            }]
        );
    }

    #[test]
    fn parse_rejects_bad_friction() {
        let error =
            Scenario::from_reader(r#"{"position": [0], "friction": 2, "duration": 1}"#.as_bytes())
                .unwrap_err();
        assert!(
            error.to_string().contains("2 was greater than one"),
            "{error}"
        );
    }

    #[test]
    fn parse_rejects_unknown_field() {
        let error = Scenario::from_reader(
            r#"{"position": [0], "friction": 0.5, "duration": 1, "mass": 3}"#.as_bytes(),
        )
        .unwrap_err();
        assert!(error.to_string().contains("unknown field `mass`"), "{error}");
    }

    #[test]
    fn load_file() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        write!(file, r#"{{"position": [0, 0], "friction": 0.9, "duration": 1}}"#).unwrap();
        let scenario = Scenario::load(file.path()).unwrap();
        assert_eq!(scenario.position, vec![0.0, 0.0]);
    }

    #[test]
    fn load_missing_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("nonexistent.json");
        let error = Scenario::load(&path).unwrap_err();
        assert!(
            error.to_string().starts_with("failed to open scenario file"),
            "{error:#}"
        );
    }

    #[test]
    fn validate_timing() {
        let valid = BuiltinScenario::Glide.scenario();

        let mut s = valid.clone();
        s.time_step = 0.0;
        assert_eq!(
            s.validate().unwrap_err().to_string(),
            "time step must be positive and finite, not 0"
        );

        let mut s = valid.clone();
        s.duration = -1.0;
        assert_eq!(
            s.validate().unwrap_err().to_string(),
            "duration must be non-negative and finite, not -1"
        );

        let mut s = valid.clone();
        s.impulses.push(Impulse {
            at: f64::NAN,
            impulse: vec![0.0, 0.0],
        });
        assert_eq!(
            s.validate().unwrap_err().to_string(),
            "impulse time must be finite, not NaN"
        );

        let mut s = valid.clone();
        s.time_step = 1e-12;
        assert_eq!(
            s.validate().unwrap_err().to_string(),
            "duration 5 at time step 0.000000000001 would take more than 1000000 steps"
        );

        let mut s = valid.clone();
        s.duration = 0.5;
        s.time_step = 1e-6;
        s.validate().unwrap();

        let mut s = valid;
        s.drag = vec![
            DragSample {
                at: 0.5,
                position: vec![0.0, 0.0],
            },
            DragSample {
                at: 0.25,
                position: vec![0.0, 0.0],
            },
        ];
        assert_eq!(
            s.validate().unwrap_err().to_string(),
            "drag sample times must be finite and increase from zero; 0.25 follows 0.5"
        );
    }
}
