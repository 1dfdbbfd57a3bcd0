//! Randomized tests against a dense reference model.
//!
//! Positions are drawn from a small integer domain so that the model can store the
//! intensity of every unit cell explicitly.

use crate::{Breakpoint, IntensitySegments};

const MIN_POS: i64 = -50;
const MAX_POS: i64 = 50;

/// Intensity of every cell `[p, p + 1)` for `p` in `MIN_POS..MAX_POS`.
struct DenseModel {
    cells: Vec<i64>,
}

impl DenseModel {
    fn new() -> DenseModel {
        DenseModel {
            cells: vec![0; (MAX_POS - MIN_POS) as usize],
        }
    }

    fn update(&mut self, from: i64, to: i64, f: impl Fn(i64) -> i64) {
        for cell in &mut self.cells[(from - MIN_POS) as usize..(to - MIN_POS) as usize] {
            *cell = f(*cell);
        }
    }

    fn value_at(&self, position: i64) -> i64 {
        if (MIN_POS..MAX_POS).contains(&position) {
            self.cells[(position - MIN_POS) as usize]
        } else {
            0
        }
    }

    /// The canonical breakpoint list describing the model.
    fn breakpoints(&self) -> Vec<Breakpoint<i64, i64>> {
        let mut result = Vec::new();
        let mut prev = 0;
        for position in MIN_POS..=MAX_POS {
            let value = self.value_at(position);
            if value != prev {
                result.push(Breakpoint::new(position, value));
                prev = value;
            }
        }
        result
    }
}

enum Op {
    Add(i64, i64, i64),
    Set(i64, i64, i64),
}

fn random_range(rng: &mut fastrand::Rng) -> (i64, i64) {
    let from = rng.i64(MIN_POS..MAX_POS);
    let to = rng.i64(from + 1..=MAX_POS);
    (from, to)
}

fn random_op(rng: &mut fastrand::Rng) -> Op {
    let (from, to) = random_range(rng);
    let amount = rng.i64(-3..=3);
    if rng.u8(0..4) == 0 {
        Op::Set(from, to, amount)
    } else {
        Op::Add(from, to, amount)
    }
}

fn apply(segments: &mut IntensitySegments, model: &mut DenseModel, op: &Op) {
    match *op {
        Op::Add(from, to, amount) => {
            segments.add(from, to, amount).unwrap();
            model.update(from, to, |v| v + amount);
        }
        Op::Set(from, to, amount) => {
            segments.set(from, to, amount).unwrap();
            model.update(from, to, |_| amount);
        }
    }
}

fn assert_matches_model(segments: &IntensitySegments, model: &DenseModel) {
    segments.check_invariants();
    assert_eq!(segments.breakpoints(), model.breakpoints().as_slice());
    for position in MIN_POS - 5..MAX_POS + 5 {
        assert_eq!(
            segments.value_at(position),
            model.value_at(position),
            "value at {position}"
        );
    }
    if let Some(first) = segments.breakpoints().first() {
        assert_eq!(segments.value_at(first.position - 1), 0);
    }
}

#[test]
fn test_random_updates_match_model() {
    let mut rng = fastrand::Rng::with_seed(0x5eed);
    for _ in 0..50 {
        let mut segments = IntensitySegments::new();
        let mut model = DenseModel::new();
        for _ in 0..100 {
            let op = random_op(&mut rng);
            apply(&mut segments, &mut model, &op);
            assert_matches_model(&segments, &model);
        }
    }
}

#[test]
fn test_random_inverse_add_restores_state() {
    let mut rng = fastrand::Rng::with_seed(17);
    for _ in 0..50 {
        let mut segments = IntensitySegments::new();
        let mut model = DenseModel::new();
        for _ in 0..rng.usize(0..30) {
            let op = random_op(&mut rng);
            apply(&mut segments, &mut model, &op);
        }

        let before = segments.clone();
        let (from, to) = random_range(&mut rng);
        let amount = rng.i64(-5..=5);
        segments.add(from, to, amount).unwrap();
        segments.check_invariants();
        segments.add(from, to, -amount).unwrap();
        segments.check_invariants();
        assert_eq!(segments, before);
    }
}

#[test]
fn test_random_set_is_idempotent() {
    let mut rng = fastrand::Rng::with_seed(99);
    for _ in 0..50 {
        let mut segments = IntensitySegments::new();
        let mut model = DenseModel::new();
        for _ in 0..rng.usize(0..30) {
            let op = random_op(&mut rng);
            apply(&mut segments, &mut model, &op);
        }

        let (from, to) = random_range(&mut rng);
        let amount = rng.i64(-3..=3);
        segments.set(from, to, amount).unwrap();
        let once = segments.clone();
        segments.set(from, to, amount).unwrap();
        assert_eq!(segments, once);
        segments.check_invariants();
    }
}

#[test]
fn test_random_render_parse_round_trip() {
    let mut rng = fastrand::Rng::with_seed(3);
    let mut segments = IntensitySegments::new();
    let mut model = DenseModel::new();
    for _ in 0..200 {
        let op = random_op(&mut rng);
        apply(&mut segments, &mut model, &op);
        let parsed: IntensitySegments = segments.to_string().parse().unwrap();
        assert_eq!(parsed, segments);
    }
}
