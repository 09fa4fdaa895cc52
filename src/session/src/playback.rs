use std::{iter, time::Duration};

use cube_core::{Cube, CubeState, Move, MoveSequence, Turn};
use log::{debug, info, warn};

use crate::pacing::Pacer;

/// Expand one solver token into its quarter turn and repetition count.
///
/// Any digits in the token are the repetition count, and the rest names the
/// turn: `R2` is `R` twice, `U3'` is `U'` three times, and a plain `F` is
/// once. A quarter turn repeated four times is the identity, so the count is
/// reduced mod 4 and is always below 4. Returns `None` for tokens that don't
/// name a turn.
pub fn expand_token(token: &str) -> Option<(Turn, usize)> {
    let base = token
        .chars()
        .filter(|c| !c.is_ascii_digit())
        .collect::<String>();
    let turn = base.parse::<Turn>().ok()?;

    let count = token
        .chars()
        .filter_map(|c| c.to_digit(10))
        .map(|digit| digit as usize)
        .reduce(|count, digit| (count * 10 + digit) % 4)
        .map_or(1, |count| count % 4);

    Some((turn, count))
}

/// The quarter turns a solver's answer expands to, produced lazily. Tokens
/// that don't parse are logged and dropped.
pub fn expand_solution(solution: &str) -> impl Iterator<Item = Turn> + '_ {
    solution
        .split_whitespace()
        .filter_map(|token| {
            let expanded = expand_token(token);
            if expanded.is_none() {
                warn!(target: "playback", "Skipping unrecognized solver token `{token}`");
            }
            expanded
        })
        .flat_map(|(turn, count)| iter::repeat_n(turn, count))
}

/// Apply steps one at a time, reporting each and waiting `delay` after it.
/// Returns how many steps were played.
pub fn play<M: Into<Move>>(
    cube: &mut Cube,
    steps: impl IntoIterator<Item = M>,
    delay: Duration,
    pacer: &mut impl Pacer,
    mut on_step: impl FnMut(Move, &CubeState),
) -> usize {
    let mut played = 0;

    for step in steps {
        let step = step.into();
        cube.apply(step);
        played += 1;

        debug!(target: "playback", "Step {played}: {step}");
        on_step(step, cube.state());
        pacer.wait(delay);
    }

    played
}

/// Animate a scramble, one move per step. Double moves are a single step.
pub fn play_scramble(
    cube: &mut Cube,
    scramble: &MoveSequence,
    delay: Duration,
    pacer: &mut impl Pacer,
    on_step: impl FnMut(Move, &CubeState),
) -> usize {
    info!(target: "playback", "Playing scramble {scramble}");
    play(cube, scramble.moves().iter().copied(), delay, pacer, on_step)
}

/// Replay a solver's answer, one quarter turn per step.
pub fn play_solution(
    cube: &mut Cube,
    solution: &str,
    delay: Duration,
    pacer: &mut impl Pacer,
    on_step: impl FnMut(Move, &CubeState),
) -> usize {
    info!(target: "playback", "Playing solution `{}`", solution.trim());

    let played = play(cube, expand_solution(solution), delay, pacer, on_step);

    if cube.is_solved() {
        info!(target: "playback", "Solved after {played} quarter turns");
    }

    played
}

#[cfg(test)]
mod tests {
    use cube_core::{Face, Variant};

    use super::*;
    use crate::pacing::Unpaced;

    #[derive(Default)]
    struct Recorder(Vec<Duration>);

    impl Pacer for Recorder {
        fn wait(&mut self, delay: Duration) {
            self.0.push(delay);
        }
    }

    #[test]
    fn test_expand_tokens() {
        assert_eq!(expand_token("R"), Some((Turn::clockwise(Face::R), 1)));
        assert_eq!(expand_token("R2"), Some((Turn::clockwise(Face::R), 2)));
        assert_eq!(
            expand_token("U3'"),
            Some((Turn::counter_clockwise(Face::U), 3))
        );
        assert_eq!(expand_token("F0"), Some((Turn::clockwise(Face::F), 0)));
        assert_eq!(expand_token("L4"), Some((Turn::clockwise(Face::L), 0)));
        assert_eq!(expand_token("D6'"), Some((Turn::counter_clockwise(Face::D), 2)));
        assert_eq!(expand_token("X2"), None);
        assert_eq!(expand_token("2"), None);
    }

    #[test]
    fn test_expand_solution() {
        assert_eq!(
            expand_solution("R2 U' ").collect::<Vec<_>>(),
            vec![
                Turn::clockwise(Face::R),
                Turn::clockwise(Face::R),
                Turn::counter_clockwise(Face::U)
            ]
        );
        assert_eq!(
            expand_solution("F Q1 B1").collect::<Vec<_>>(),
            vec![Turn::clockwise(Face::F), Turn::clockwise(Face::B)]
        );
        assert_eq!(expand_solution("   ").count(), 0);
    }

    #[test]
    fn test_solution_waits_after_every_quarter_turn() {
        let mut cube = Cube::new(Variant::Cube3x3);
        let mut recorder = Recorder::default();
        let mut seen = vec![];

        let played = play_solution(
            &mut cube,
            "R2 U'",
            Duration::from_millis(200),
            &mut recorder,
            |step, _| seen.push(step.to_string()),
        );

        assert_eq!(played, 3);
        assert_eq!(seen, vec!["R", "R", "U'"]);
        assert_eq!(recorder.0, vec![Duration::from_millis(200); 3]);
    }

    #[test]
    fn test_scramble_doubles_are_one_step() {
        let mut cube = Cube::new(Variant::Cube2x2);
        let scramble: MoveSequence = "R2 U F'".parse().unwrap();
        let mut recorder = Recorder::default();

        let played = play_scramble(
            &mut cube,
            &scramble,
            Duration::from_millis(100),
            &mut recorder,
            |_, _| {},
        );
        assert_eq!(played, 3);
        assert_eq!(recorder.0.len(), 3);

        play_solution(&mut cube, "F1 U3 R2", Duration::ZERO, &mut Unpaced, |_, _| {});
        assert!(cube.is_solved());
    }

    #[test]
    fn test_bad_tokens_do_not_stop_playback() {
        let mut cube = Cube::new(Variant::Cube3x3);
        let played = play_solution(&mut cube, "R ?? R'", Duration::ZERO, &mut Unpaced, |_, _| {});
        assert_eq!(played, 2);
        assert!(cube.is_solved());
    }

    #[test]
    fn test_huge_repeat_counts_play_their_remainder() {
        assert_eq!(
            expand_token("U99999999999999999"),
            Some((Turn::clockwise(Face::U), 3))
        );
        assert_eq!(
            expand_token("R123456789012345678901234567890'"),
            Some((Turn::counter_clockwise(Face::R), 2))
        );

        let mut cube = Cube::new(Variant::Cube3x3);
        let played = play_solution(
            &mut cube,
            "R U99999999999999999 U F F'",
            Duration::ZERO,
            &mut Unpaced,
            |_, _| {},
        );
        assert_eq!(played, 7);

        play_solution(&mut cube, "R'", Duration::ZERO, &mut Unpaced, |_, _| {});
        assert!(cube.is_solved());
    }
}
