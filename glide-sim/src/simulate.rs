use anyhow::Context as _;
use manyfmt::Refmt as _;

use glide::util::ConciseDebug;
use glide::{ClockedBody, KinematicBody};

use crate::scenario::Scenario;

/// The state of the body at one point in a scenario.
#[derive(Clone, Debug, PartialEq, serde::Serialize)]
#[non_exhaustive]
pub struct Sample {
    /// Seconds since the start of the scenario.
    pub time: f64,
    /// Position of the body.
    pub position: Vec<f64>,
    /// Velocity of the body.
    pub velocity: Vec<f64>,
    /// Magnitude of `velocity`.
    pub speed: f64,
    /// Whether the body [is at rest](KinematicBody::is_at_rest).
    pub at_rest: bool,
}

impl Sample {
    fn of(time: f64, body: &KinematicBody) -> Self {
        Self {
            time,
            position: body.position().to_vec(),
            velocity: body.velocity().to_vec(),
            speed: body.speed(),
            at_rest: body.is_at_rest(),
        }
    }
}

/// Runs `scenario` and returns the state of the body at its start, after each drag sample,
/// and after each coasting step.
///
/// Returns an error if the scenario is [invalid](Scenario::validate) or any of its vectors
/// has a length different from its position.
pub fn run(scenario: &Scenario) -> Result<Vec<Sample>, anyhow::Error> {
    scenario.validate()?;

    let mut body = KinematicBody::with_params(&scenario.position, scenario.params());
    if let Some(velocity) = &scenario.velocity {
        body.set_velocity(velocity)
            .context("invalid initial velocity")?;
    }
    let mut body = ClockedBody::new(body, 0.0);
    let mut samples = vec![Sample::of(0.0, body.body())];

    for drag in &scenario.drag {
        body.move_to(&drag.position, drag.at)
            .with_context(|| format!("invalid drag sample at t = {}", drag.at))?;
        samples.push(Sample::of(drag.at, body.body()));
    }
    let release = body.last_update();
    if !scenario.drag.is_empty() {
        log::debug!(
            "released at t = {release}: {}",
            body.body().refmt(&ConciseDebug)
        );
    }

    // Step times are computed from the step count, not accumulated, so that they do not
    // drift from the nominal times.
    let time_step = scenario.time_step;
    let step_count = ((scenario.duration - release) / time_step - 1e-9).ceil().max(0.0) as u64;
    let step_start = |step: u64| release + (step - 1) as f64 * time_step;

    // Impulses after the start of the last step would never be applied.
    let mut impulses: Vec<_> = scenario
        .impulses
        .iter()
        .filter(|impulse| step_count > 0 && impulse.at <= step_start(step_count))
        .collect();
    if impulses.len() < scenario.impulses.len() {
        log::debug!(
            "ignoring {} impulses after the last step",
            scenario.impulses.len() - impulses.len()
        );
    }
    impulses.sort_by(|a, b| a.at.total_cmp(&b.at));
    let mut pending = impulses.into_iter().peekable();

    for step in 1..=step_count {
        let start = body.last_update();
        while let Some(impulse) = pending.next_if(|impulse| impulse.at <= start) {
            body.body_mut()
                .apply_impulse(&impulse.impulse)
                .with_context(|| format!("invalid impulse at t = {}", impulse.at))?;
            log::debug!(
                "impulse at t = {start}: {}",
                body.body().refmt(&ConciseDebug)
            );
        }

        if scenario.stop_at_rest && body.body().is_at_rest() && pending.peek().is_none() {
            log::debug!("at rest at t = {start}; stopping");
            break;
        }

        let now = release + step as f64 * time_step;
        body.coast(now);
        samples.push(Sample::of(now, body.body()));
    }

    Ok(samples)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::scenario::{BuiltinScenario, DragSample, Impulse};
    use glide::BodyError;
    use glide::math::zo64;
    use pretty_assertions::assert_eq;

    fn assert_close(actual: &[f64], expected: &[f64]) {
        assert_eq!(actual.len(), expected.len(), "{actual:?} vs. {expected:?}");
        for (a, e) in actual.iter().zip(expected) {
            assert!((a - e).abs() < 1e-9, "{actual:?} vs. {expected:?}");
        }
    }

    fn times(samples: &[Sample]) -> Vec<f64> {
        samples.iter().map(|s| s.time).collect()
    }

    fn frictionless() -> Scenario {
        Scenario {
            velocity: Some(vec![2.0]),
            friction: zo64(1.0),
            time_step: 0.5,
            duration: 1.0,
            impulses: vec![],
            ..BuiltinScenario::Impulse.scenario()
        }
    }

    #[test]
    fn glide_matches_explicit_updates() {
        let samples = run(&BuiltinScenario::Glide.scenario()).unwrap();
        assert_eq!(times(&samples), vec![0.0, 1.0, 2.0, 3.0, 4.0, 5.0]);

        let mut body = KinematicBody::new(&[0.0, 0.0], 0.9).unwrap();
        body.set_velocity(&[10.0, 5.0]).unwrap();
        for sample in &samples[1..] {
            body.update(1.0);
            assert_eq!(sample.position, body.position());
            assert_eq!(sample.velocity, body.velocity());
        }
        assert_close(&samples[1].position, &[10.0, 5.0]);
        assert_close(&samples[1].velocity, &[9.0, 4.5]);
    }

    #[test]
    fn impulse_applies_at_start_of_step() {
        let samples = run(&BuiltinScenario::Impulse.scenario()).unwrap();
        assert_eq!(times(&samples), vec![0.0, 1.0, 2.0, 3.0, 4.0]);
        assert_close(&samples[1].position, &[5.0]);
        assert_close(&samples[1].velocity, &[4.75]);
        // The impulse of 3 takes effect for the step from t = 1 to t = 2.
        assert_close(&samples[2].position, &[5.0 + 7.75]);
        assert_close(&samples[2].velocity, &[7.75 * 0.95]);
    }

    #[test]
    fn frictionless_samples() {
        let samples = run(&frictionless()).unwrap();
        assert_eq!(
            samples,
            vec![
                Sample {
                    time: 0.0,
                    position: vec![0.0],
                    velocity: vec![2.0],
                    speed: 2.0,
                    at_rest: false,
                },
                Sample {
                    time: 0.5,
                    position: vec![1.0],
                    velocity: vec![2.0],
                    speed: 2.0,
                    at_rest: false,
                },
                Sample {
                    time: 1.0,
                    position: vec![2.0],
                    velocity: vec![2.0],
                    speed: 2.0,
                    at_rest: false,
                },
            ]
        );
    }

    #[test]
    fn halt_stops_at_rest() {
        let scenario = Scenario {
            duration: 1000.0,
            ..BuiltinScenario::Halt.scenario()
        };
        let samples = run(&scenario).unwrap();
        let last = samples.last().unwrap();
        assert!(last.at_rest);
        assert_eq!(last.velocity, vec![0.0, 0.0, 0.0]);
        assert!(last.time < 100.0, "{last:?}");
        assert!(samples[..samples.len() - 1].iter().all(|s| !s.at_rest));
    }

    #[test]
    fn stop_at_rest_waits_for_impulse() {
        let scenario = Scenario {
            position: vec![0.0],
            velocity: None,
            stop_at_rest: true,
            impulses: vec![Impulse {
                at: 2.0,
                impulse: vec![1.0],
            }],
            ..frictionless()
        };
        let scenario = Scenario {
            duration: 3.0,
            time_step: 1.0,
            ..scenario
        };
        let samples = run(&scenario).unwrap();
        assert_eq!(times(&samples), vec![0.0, 1.0, 2.0, 3.0]);
        assert_eq!(samples[3].position, vec![1.0]);
    }

    #[test]
    fn stop_at_rest_ignores_impulse_after_end() {
        let scenario = Scenario {
            position: vec![0.0],
            velocity: None,
            stop_at_rest: true,
            impulses: vec![Impulse {
                // after the start of the last step, which is at 0.5
                at: 0.75,
                impulse: vec![1.0],
            }],
            ..frictionless()
        };
        let samples = run(&scenario).unwrap();
        assert_eq!(times(&samples), vec![0.0]);
        assert_eq!(samples[0].position, vec![0.0]);
    }

    #[test]
    fn already_at_rest() {
        let scenario = Scenario {
            velocity: None,
            stop_at_rest: true,
            ..frictionless()
        };
        let samples = run(&scenario).unwrap();
        assert_eq!(times(&samples), vec![0.0]);
        assert!(samples[0].at_rest);
    }

    #[test]
    fn fling_releases_with_drag_velocity() {
        let samples = run(&BuiltinScenario::Fling.scenario()).unwrap();
        // initial, 4 drag samples, then coasting
        assert_eq!(samples[4].time, 0.064);
        assert_close(&samples[4].position, &[16.0, 4.0]);
        assert_close(&samples[4].velocity, &[250.0, 62.5]);
        assert_close(&[samples[5].time], &[0.314]);
        assert_close(&samples[5].position, &[16.0 + 62.5, 4.0 + 15.625]);
        assert!(samples[5].speed < samples[4].speed);
        assert!(samples.last().unwrap().time >= 3.0);
    }

    #[test]
    fn drag_at_time_zero_keeps_velocity() {
        let scenario = Scenario {
            drag: vec![DragSample {
                at: 0.0,
                position: vec![10.0],
            }],
            duration: 0.0,
            ..frictionless()
        };
        let samples = run(&scenario).unwrap();
        assert_eq!(samples.len(), 2);
        assert_eq!(samples[1].position, vec![10.0]);
        assert_eq!(samples[1].velocity, vec![2.0]);
    }

    #[test]
    fn wrong_dimension_velocity() {
        let scenario = Scenario {
            velocity: Some(vec![1.0, 1.0]),
            ..frictionless()
        };
        let error = run(&scenario).unwrap_err();
        assert_eq!(error.to_string(), "invalid initial velocity");
        assert!(
            matches!(
                error.downcast_ref::<BodyError>(),
                Some(&BodyError::DimensionMismatch {
                    expected: 1,
                    actual: 2,
                    ..
                })
            ),
            "{error:?}"
        );
    }

    #[test]
    fn wrong_dimension_impulse() {
        let scenario = Scenario {
            impulses: vec![Impulse {
                at: 0.5,
                impulse: vec![],
            }],
            ..frictionless()
        };
        let error = run(&scenario).unwrap_err();
        assert_eq!(
            format!("{error:#}"),
            "invalid impulse at t = 0.5: vector has 0 components but the body has 1 dimensions"
        );
    }

    #[test]
    fn invalid_timing_is_reported() {
        let scenario = Scenario {
            time_step: -1.0,
            ..frictionless()
        };
        assert!(run(&scenario).is_err());
    }
}
