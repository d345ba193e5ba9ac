#![no_main]

use glide::{BodyError, BodyParams, ClockedBody, KinematicBody};

use libfuzzer_sys::fuzz_target;
use pretty_assertions::assert_eq;

#[derive(Debug, arbitrary::Arbitrary)]
enum Operation {
    SetVelocity(Vec<f64>),
    ApplyImpulse(Vec<f64>),
    SetPosition(Vec<f64>),
    Stop,
    Update(f64),
    MoveTo(Vec<f64>, f64),
    Coast(f64),
    SetPositionAt(Vec<f64>, f64),
}

fuzz_target!(|input: (BodyParams, Vec<f64>, Vec<Operation>)| {
    let (params, initial_position, operations) = input;
    let dimension = initial_position.len();
    let mut body = ClockedBody::new(KinematicBody::with_params(&initial_position, params), 0.0);

    for operation in operations.into_iter().take(256) {
        let before = body.clone();
        let (result, vector_len) = match operation {
            Operation::SetVelocity(v) => (body.body_mut().set_velocity(&v), Some(v.len())),
            Operation::ApplyImpulse(v) => (body.body_mut().apply_impulse(&v), Some(v.len())),
            Operation::SetPosition(v) => (body.body_mut().set_position(&v), Some(v.len())),
            Operation::Stop => {
                body.body_mut().stop();
                assert!(body.body().is_at_rest());
                (Ok(()), None)
            }
            Operation::Update(dt) => {
                body.body_mut().update(dt);
                check_snapped(body.body());
                (Ok(()), None)
            }
            Operation::MoveTo(v, now) => (body.move_to(&v, now), Some(v.len())),
            Operation::Coast(now) => {
                body.coast(now);
                check_snapped(body.body());
                (Ok(()), None)
            }
            Operation::SetPositionAt(v, now) => (body.set_position(&v, now), Some(v.len())),
        };

        assert_eq!(body.body().dimension(), dimension);
        assert_eq!(body.body().velocity().len(), dimension);
        assert_eq!(body.body().params(), params);

        match (result, vector_len) {
            (Ok(()), Some(len)) => assert_eq!(len, dimension),
            (Ok(()), None) => {}
            (Err(error), Some(len)) => {
                assert!(
                    matches!(
                        error,
                        BodyError::DimensionMismatch { expected, actual, .. }
                            if expected == dimension && actual == len
                    ),
                    "unexpected error {error:?}"
                );
                // Compare bit patterns, since NaN != NaN.
                assert_eq!(bits(&body), bits(&before), "state changed on error");
            }
            (Err(error), None) => panic!("unexpected error {error:?}"),
        }
    }
});

/// After time advances, no velocity component is nonzero but below the rest threshold.
fn check_snapped(body: &KinematicBody) {
    let epsilon = body.rest_epsilon().into_inner();
    for &v in body.velocity() {
        assert!(
            !(v != 0.0 && v.abs() < epsilon),
            "velocity component {v} not snapped to zero"
        );
    }
}

fn bits(body: &ClockedBody<f64>) -> (Vec<u64>, Vec<u64>, u64) {
    (
        body.body().position().iter().map(|c| c.to_bits()).collect(),
        body.body().velocity().iter().map(|c| c.to_bits()).collect(),
        body.last_update().to_bits(),
    )
}
