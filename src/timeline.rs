//! Timeline builder: flattens a [`Score`] into time-stamped playable points.
//!
//! Every step of every section becomes one [`TimelinePoint`], rests included.
//! Time runs continuously across section boundaries, each section spacing its
//! points by its own tempo.

use serde::Serialize;

use crate::score::Score;

/// Tempo used when a section declares none (or declares `0`).
pub const DEFAULT_TEMPO: u32 = 120;

/// Symbol that silences an instrument instead of playing it.
pub const MUTE_SYMBOL: char = '.';

/// Symbol that marks a rest.
pub const REST_SYMBOL: char = ' ';

/// One instrument's symbol at one step.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct InstrumentAction {
    pub label: String,
    pub symbol: char,
}

impl InstrumentAction {
    pub fn is_mute(&self) -> bool {
        self.symbol == MUTE_SYMBOL
    }
}

/// One step's simultaneous actions, with its absolute time and tempo.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct TimelinePoint {
    /// Global step index, starting at 0.
    pub timeline_step: usize,
    pub section_id: usize,
    /// Step index within the section.
    pub section_step: usize,
    /// Seconds from the start of the piece.
    pub time: f64,
    /// Tempo in effect at this point.
    pub tempo: u32,
    pub actions: Vec<InstrumentAction>,
}

/// The flattened, ordered event sequence of a score.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct Timeline {
    points: Vec<TimelinePoint>,
}

/// Tempo actually used for a declared section tempo.
pub fn effective_tempo(tempo: u32) -> u32 {
    if tempo == 0 {
        DEFAULT_TEMPO
    } else {
        tempo
    }
}

/// Build the timeline of a score.
pub fn build_timeline(score: &Score) -> Timeline {
    let mut points = Vec::new();
    let mut time = 0.0_f64;

    for section in &score.sections {
        let tempo = effective_tempo(section.tempo);
        let step_seconds = 60.0 / tempo as f64;

        let rows: Vec<(&str, Vec<char>)> = section
            .tracks
            .iter()
            .map(|t| (t.label.as_str(), t.value.chars().collect()))
            .collect();
        let max_steps = rows.iter().map(|(_, steps)| steps.len()).max().unwrap_or(0);

        for step in 0..max_steps {
            let actions = rows
                .iter()
                .filter_map(|(label, steps)| match steps.get(step) {
                    Some(&symbol) if symbol != REST_SYMBOL => Some(InstrumentAction {
                        label: (*label).to_string(),
                        symbol,
                    }),
                    _ => None,
                })
                .collect();

            points.push(TimelinePoint {
                timeline_step: points.len(),
                section_id: section.id,
                section_step: step,
                time,
                tempo,
                actions,
            });

            time += step_seconds;
        }
    }

    Timeline { points }
}

impl Timeline {
    pub fn points(&self) -> &[TimelinePoint] {
        &self.points
    }

    pub fn get(&self, index: usize) -> Option<&TimelinePoint> {
        self.points.get(index)
    }

    pub fn len(&self) -> usize {
        self.points.len()
    }

    pub fn is_empty(&self) -> bool {
        self.points.is_empty()
    }

    pub fn iter(&self) -> std::slice::Iter<'_, TimelinePoint> {
        self.points.iter()
    }

    /// Global index of `step` within section `section_id`, if that point exists.
    pub fn position_of(&self, section_id: usize, step: usize) -> Option<usize> {
        let first = self.points.iter().position(|p| p.section_id == section_id)?;
        let index = first + step;
        match self.points.get(index) {
            Some(p) if p.section_id == section_id => Some(index),
            _ => None,
        }
    }

    /// Time at which the last point ends.
    pub fn duration(&self) -> f64 {
        self.points
            .last()
            .map_or(0.0, |p| p.time + 60.0 / p.tempo as f64)
    }
}

impl<'a> IntoIterator for &'a Timeline {
    type Item = &'a TimelinePoint;
    type IntoIter = std::slice::Iter<'a, TimelinePoint>;

    fn into_iter(self) -> Self::IntoIter {
        self.points.iter()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::score::{Section, Track};
    use assert_approx_eq::assert_approx_eq;

    fn section(id: usize, tempo: u32, tracks: &[(&str, &str)]) -> Section {
        Section {
            id,
            title: format!("s{id}"),
            tempo,
            tracks: tracks.iter().map(|(l, v)| Track::new(*l, *v)).collect(),
        }
    }

    fn score(sections: Vec<Section>) -> Score {
        Score {
            title: String::new(),
            composer: String::new(),
            sections,
        }
    }

    fn labels(point: &TimelinePoint) -> Vec<&str> {
        point.actions.iter().map(|a| a.label.as_str()).collect()
    }

    #[test]
    fn empty_score_gives_empty_timeline() {
        let timeline = build_timeline(&Score::default());
        assert!(timeline.is_empty());
        assert_eq!(timeline.duration(), 0.0);
    }

    #[test]
    fn ragged_tracks_pad_with_rests() {
        let s = score(vec![section(
            0,
            120,
            &[("a", "xxxxx"), ("b", "xxx"), ("c", "xxxxxxx")],
        )]);
        let timeline = build_timeline(&s);
        assert_eq!(timeline.len(), 7);
        assert_eq!(labels(&timeline.points()[2]), vec!["a", "b", "c"]);
        assert_eq!(labels(&timeline.points()[3]), vec!["a", "c"]);
        assert_eq!(labels(&timeline.points()[4]), vec!["a", "c"]);
        assert_eq!(labels(&timeline.points()[5]), vec!["c"]);
        assert_eq!(labels(&timeline.points()[6]), vec!["c"]);
    }

    #[test]
    fn rest_steps_still_emit_points() {
        let s = score(vec![section(0, 120, &[("label", "E ")])]);
        let timeline = build_timeline(&s);
        assert_eq!(timeline.len(), 2);
        assert_eq!(
            timeline.points()[0].actions,
            vec![InstrumentAction {
                label: "label".into(),
                symbol: 'E'
            }]
        );
        assert!(timeline.points()[1].actions.is_empty());
    }

    #[test]
    fn mute_symbol_is_kept() {
        let s = score(vec![section(0, 120, &[("r1", "E.")])]);
        let timeline = build_timeline(&s);
        let action = &timeline.points()[1].actions[0];
        assert_eq!(action.symbol, '.');
        assert!(action.is_mute());
    }

    #[test]
    fn actions_follow_track_order() {
        let s = score(vec![section(0, 120, &[("z", "x"), ("a", "y"), ("m", "w")])]);
        let timeline = build_timeline(&s);
        assert_eq!(labels(&timeline.points()[0]), vec!["z", "a", "m"]);
    }

    #[test]
    fn accented_symbols_count_as_one_step() {
        let s = score(vec![section(0, 120, &[("kkr", "ḱÁ.")])]);
        let timeline = build_timeline(&s);
        assert_eq!(timeline.len(), 3);
        assert_eq!(timeline.points()[0].actions[0].symbol, 'ḱ');
        assert_eq!(timeline.points()[1].actions[0].symbol, 'Á');
    }

    #[test]
    fn time_spacing_follows_each_section_tempo() {
        let s = score(vec![
            section(0, 120, &[("a", "xxx")]),
            section(1, 60, &[("a", "xx")]),
        ]);
        let timeline = build_timeline(&s);
        let times: Vec<f64> = timeline.iter().map(|p| p.time).collect();
        assert_approx_eq!(times[0], 0.0);
        assert_approx_eq!(times[1], 0.5);
        assert_approx_eq!(times[2], 1.0);
        // Boundary: continues from the last 120 bpm step, then 1s spacing.
        assert_approx_eq!(times[3], 1.5);
        assert_approx_eq!(times[4], 2.5);
        assert_approx_eq!(timeline.duration(), 3.5);
    }

    #[test]
    fn zero_tempo_falls_back_to_default() {
        let s = score(vec![section(0, 0, &[("a", "xx")])]);
        let timeline = build_timeline(&s);
        assert_eq!(timeline.points()[0].tempo, DEFAULT_TEMPO);
        assert_approx_eq!(timeline.points()[1].time, 0.5);
    }

    #[test]
    fn empty_sections_contribute_nothing() {
        let s = score(vec![
            section(0, 100, &[("a", "xx")]),
            section(1, 50, &[]),
            section(2, 50, &[("a", ""), ("b", "")]),
            section(3, 120, &[("a", "x")]),
        ]);
        let timeline = build_timeline(&s);
        assert_eq!(timeline.len(), 3);
        assert_eq!(timeline.points()[2].section_id, 3);
        assert_approx_eq!(timeline.points()[2].time, 1.2);
    }

    #[test]
    fn steps_are_numbered_globally_and_locally() {
        let s = score(vec![
            section(0, 120, &[("a", "xx")]),
            section(1, 120, &[("a", "xxx")]),
        ]);
        let timeline = build_timeline(&s);
        let steps: Vec<(usize, usize, usize)> = timeline
            .iter()
            .map(|p| (p.timeline_step, p.section_id, p.section_step))
            .collect();
        assert_eq!(
            steps,
            vec![(0, 0, 0), (1, 0, 1), (2, 1, 0), (3, 1, 1), (4, 1, 2)]
        );
    }

    #[test]
    fn position_of_locates_section_steps() {
        let s = score(vec![
            section(0, 120, &[("a", "xx")]),
            section(1, 120, &[("a", "xxx")]),
        ]);
        let timeline = build_timeline(&s);
        assert_eq!(timeline.position_of(0, 1), Some(1));
        assert_eq!(timeline.position_of(1, 0), Some(2));
        assert_eq!(timeline.position_of(1, 2), Some(4));
        assert_eq!(timeline.position_of(1, 3), None);
        assert_eq!(timeline.position_of(0, 2), None);
        assert_eq!(timeline.position_of(7, 0), None);
    }

    #[test]
    fn build_is_deterministic() {
        let s = score(vec![section(0, 97, &[("a", "x y"), ("b", ".z")])]);
        assert_eq!(build_timeline(&s), build_timeline(&s));
    }
}
