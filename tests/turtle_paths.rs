// tests/turtle_paths.rs
use glam::Vec3;
use std::f32::consts::FRAC_PI_2;
use tortuga::{
    BoundSymbol, SegmentBounds, Sentence, SymbolRegistry, TurtleConfig, TurtleError,
    TurtleInterpreter, TurtleOp,
};

fn setup() -> (TurtleInterpreter, SymbolRegistry) {
    let mut registry = SymbolRegistry::new();
    registry.define('F', vec!['l']);
    registry.define('+', vec!['a']);
    registry.define('-', vec!['a']);
    registry.define('&', vec!['a']);
    registry.define('^', vec!['a']);
    registry.define('\\', vec!['a']);
    registry.define('/', vec!['a']);
    registry.define('[', vec![]);
    registry.define(']', vec![]);
    registry.define('A', vec!['x']); // no turtle meaning

    let interpreter = TurtleInterpreter::standard(TurtleConfig::default(), &registry);
    (interpreter, registry)
}

/// Builds a sentence from `(letter, values)` pairs.
fn word(registry: &SymbolRegistry, symbols: &[(char, Vec<f64>)]) -> Sentence {
    Sentence::from(
        symbols
            .iter()
            .map(|(c, v)| BoundSymbol::from_letter(registry, *c, v.clone()).unwrap())
            .collect::<Vec<_>>(),
    )
}

fn assert_close(a: Vec3, b: Vec3) {
    assert!(a.abs_diff_eq(b, 1e-5), "{a} != {b}");
}

#[test]
fn test_single_move() {
    let (interpreter, registry) = setup();
    let sentence = word(&registry, &[('F', vec![1.0])]);

    let segments = interpreter.interpret(&sentence).unwrap();

    assert_eq!(segments.len(), 1);
    assert_eq!(segments[0].start, Vec3::ZERO);
    assert_eq!(segments[0].end, Vec3::new(0.0, 0.0, 1.0));
    // Stack depth 0 -> width 1/2.
    assert_eq!(segments[0].width, 0.5);
}

#[test]
fn test_push_pop_restores_position() {
    let (interpreter, registry) = setup();
    let sentence = word(
        &registry,
        &[('[', vec![]), ('F', vec![1.0]), (']', vec![]), ('F', vec![1.0])],
    );

    let segments = interpreter.interpret(&sentence).unwrap();

    assert_eq!(segments.len(), 2);
    assert_eq!(segments[0].start, Vec3::ZERO);
    assert_eq!(segments[1].start, Vec3::ZERO);
    // The branched stroke is one level deeper, so thinner.
    assert!((segments[0].width - 1.0 / 3.0).abs() < 1e-6);
    assert_eq!(segments[1].width, 0.5);
}

#[test]
fn test_branch_does_not_perturb_trunk() {
    let (interpreter, registry) = setup();
    let sentence = word(
        &registry,
        &[
            ('F', vec![1.0]),
            ('[', vec![]),
            ('+', vec![0.7]),
            ('F', vec![1.0]),
            (']', vec![]),
            ('F', vec![1.0]),
        ],
    );

    let segments = interpreter.interpret(&sentence).unwrap();

    assert_eq!(segments.len(), 3);
    assert_eq!(segments[2].start, segments[0].end);
    // The trunk keeps its heading after the branch.
    assert_close(segments[2].end, Vec3::new(0.0, 0.0, 2.0));
    // The branch really did turn.
    assert!(segments[1].end.y.abs() > 0.1);
}

#[test]
fn test_rotations_about_fixed_axes() {
    let (interpreter, registry) = setup();
    let angle = vec![FRAC_PI_2 as f64];

    // +90 about X turns +Z into -Y.
    let sentence = word(&registry, &[('+', angle.clone()), ('F', vec![1.0])]);
    let segments = interpreter.interpret(&sentence).unwrap();
    assert_close(segments[0].end, Vec3::NEG_Y);

    // -90 about X turns +Z into +Y.
    let sentence = word(&registry, &[('-', angle.clone()), ('F', vec![1.0])]);
    let segments = interpreter.interpret(&sentence).unwrap();
    assert_close(segments[0].end, Vec3::Y);

    // +90 about Y turns +Z into +X.
    let sentence = word(&registry, &[('&', angle.clone()), ('F', vec![1.0])]);
    let segments = interpreter.interpret(&sentence).unwrap();
    assert_close(segments[0].end, Vec3::X);

    // -90 about Y turns +Z into -X.
    let sentence = word(&registry, &[('^', angle.clone()), ('F', vec![1.0])]);
    let segments = interpreter.interpret(&sentence).unwrap();
    assert_close(segments[0].end, Vec3::NEG_X);

    // `\` and `/` behave like `+` and `-`.
    let sentence = word(&registry, &[('\\', angle.clone()), ('F', vec![1.0])]);
    let segments = interpreter.interpret(&sentence).unwrap();
    assert_close(segments[0].end, Vec3::NEG_Y);

    let sentence = word(&registry, &[('/', angle.clone()), ('F', vec![1.0])]);
    let segments = interpreter.interpret(&sentence).unwrap();
    assert_close(segments[0].end, Vec3::Y);
}

#[test]
fn test_move_scales_with_heading_length() {
    let (_, registry) = setup();
    let config = TurtleConfig {
        initial_heading: Vec3::new(0.0, 0.0, 2.0),
        ..Default::default()
    };
    let interpreter = TurtleInterpreter::standard(config, &registry);
    let sentence = word(&registry, &[('F', vec![1.5])]);

    let segments = interpreter.interpret(&sentence).unwrap();
    assert_eq!(segments[0].end, Vec3::new(0.0, 0.0, 3.0));
}

#[test]
fn test_unmapped_symbols_are_ignored() {
    let (interpreter, registry) = setup();
    let sentence = word(&registry, &[('A', vec![9.0]), ('F', vec![1.0]), ('A', vec![1.0])]);

    let segments = interpreter.interpret(&sentence).unwrap();
    assert_eq!(segments.len(), 1);
}

#[test]
fn test_pop_on_empty_stack_fails() {
    let (interpreter, registry) = setup();
    let sentence = word(&registry, &[('F', vec![1.0]), (']', vec![])]);

    assert_eq!(
        interpreter.interpret(&sentence),
        Err(TurtleError::StackUnderflow { index: 1 })
    );
}

#[test]
fn test_custom_mapping() {
    let mut registry = SymbolRegistry::new();
    let g = registry.define('G', vec!['l']);
    let mut interpreter = TurtleInterpreter::new(TurtleConfig::default());
    interpreter.set_op(g, TurtleOp::Move);

    let sentence = word(&registry, &[('G', vec![2.0])]);
    let segments = interpreter.interpret(&sentence).unwrap();
    assert_eq!(segments[0].end, Vec3::new(0.0, 0.0, 2.0));
}

#[test]
fn test_missing_parameter_uses_defaults() {
    let mut registry = SymbolRegistry::new();
    registry.define('F', vec![]);
    registry.define('+', vec![]);
    let interpreter = TurtleInterpreter::standard(TurtleConfig::default(), &registry);

    let sentence = word(&registry, &[('+', vec![]), ('F', vec![])]);
    let segments = interpreter.interpret(&sentence).unwrap();
    assert_close(segments[0].end, Vec3::NEG_Y);
}

#[test]
fn test_bounds() {
    let (interpreter, registry) = setup();
    let sentence = word(
        &registry,
        &[('F', vec![2.5]), ('+', vec![FRAC_PI_2 as f64]), ('F', vec![1.0])],
    );
    let segments = interpreter.interpret(&sentence).unwrap();

    let bounds = SegmentBounds::from_segments(&segments).unwrap();
    assert_close(bounds.min, Vec3::new(0.0, -1.0, 0.0));
    assert_close(bounds.max, Vec3::new(0.0, 0.0, 2.5));
    assert_eq!(bounds.half_extent(), 3.0);

    assert!(SegmentBounds::from_segments(&[]).is_none());
}
