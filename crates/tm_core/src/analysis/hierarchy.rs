//! # Pitch Hierarchy
//!
//! The one place that walks or builds Season → Game → Inning →
//! PlateAppearance → Pitch. Everything else works on flat pitch slices.
//!
//! Ordering rules:
//! - innings by number, `Top` before `Bottom`
//! - plate appearances by `pa_of_inning`
//! - pitches by `pitch_of_pa` (stable, so duplicates keep input order)
//! - games by date, then id; seasons by label, "Offseason" last

use crate::models::{
    Game, HalfInning, Inning, PitchEvent, PlateAppearance, PlateAppearanceKey, Season, SeasonLabel,
};
use chrono::NaiveDate;
use fxhash::FxHashMap;
use std::collections::BTreeMap;

/// Label used for pitches whose date falls outside every season.
pub const OFFSEASON_LABEL: &str = "Offseason";

/// Pitches in traversal order, borrowed.
pub fn iter_pitches(seasons: &[Season]) -> impl Iterator<Item = &PitchEvent> {
    seasons
        .iter()
        .flat_map(|s| s.games.iter())
        .flat_map(|g| g.innings.iter())
        .flat_map(|i| i.plate_appearances.iter())
        .flat_map(|pa| pa.pitches.iter())
}

/// Pitches in traversal order.
pub fn flatten(seasons: &[Season]) -> Vec<PitchEvent> {
    iter_pitches(seasons).cloned().collect()
}

/// Group one game's pitches into ordered innings and plate appearances.
///
/// Lossless: every input pitch lands in exactly one plate appearance.
pub fn group(pitches: &[PitchEvent]) -> Vec<Inning> {
    let mut innings: BTreeMap<(u8, HalfInning), BTreeMap<u16, Vec<PitchEvent>>> = BTreeMap::new();
    for p in pitches {
        innings
            .entry((p.inning, p.half))
            .or_default()
            .entry(p.pa_of_inning)
            .or_default()
            .push(p.clone());
    }

    innings
        .into_iter()
        .map(|((inning, half), pas)| Inning {
            inning,
            half,
            plate_appearances: pas
                .into_iter()
                .map(|(pa_of_inning, mut pitches)| {
                    pitches.sort_by_key(|p| p.pitch_of_pa);
                    PlateAppearance { pa_of_inning, pitches }
                })
                .collect(),
        })
        .collect()
}

/// Group pitches into games, each built with [`group`].
pub fn group_games(pitches: &[PitchEvent]) -> Vec<Game> {
    let mut by_game: FxHashMap<&str, Vec<PitchEvent>> = FxHashMap::default();
    let mut order: Vec<&str> = Vec::new();
    for p in pitches {
        let entry = by_game.entry(p.game_id.as_str()).or_insert_with(|| {
            order.push(p.game_id.as_str());
            Vec::new()
        });
        entry.push(p.clone());
    }

    let mut games: Vec<Game> = order
        .into_iter()
        .filter_map(|id| by_game.remove(id).map(|ps| (id, ps)))
        .map(|(id, ps)| Game {
            game_id: id.to_string(),
            date: ps.iter().filter_map(|p| p.date).min(),
            innings: group(&ps),
        })
        .collect();

    games.sort_by(|a, b| {
        date_key(a.date).cmp(&date_key(b.date)).then_with(|| a.game_id.cmp(&b.game_id))
    });
    games
}

fn date_key(date: Option<NaiveDate>) -> NaiveDate {
    date.unwrap_or(NaiveDate::MAX)
}

/// Group pitches into seasons by the label of each game's date.
pub fn group_seasons(pitches: &[PitchEvent]) -> Vec<Season> {
    let mut by_label: BTreeMap<Option<SeasonLabel>, Vec<Game>> = BTreeMap::new();
    for game in group_games(pitches) {
        let label = game.date.and_then(SeasonLabel::from_date);
        by_label.entry(label).or_default().push(game);
    }

    let mut seasons: Vec<Season> = Vec::with_capacity(by_label.len());
    let mut offseason = None;
    for (label, games) in by_label {
        match label {
            Some(label) => seasons.push(Season { label: label.to_string(), games }),
            None => offseason = Some(Season { label: OFFSEASON_LABEL.to_string(), games }),
        }
    }
    seasons.extend(offseason);
    seasons
}

/// Final pitch of every plate appearance.
///
/// The final pitch has the highest `pitch_of_pa`; on ties the later one in
/// input order wins.
pub fn final_pitches(pitches: &[PitchEvent]) -> FxHashMap<PlateAppearanceKey, &PitchEvent> {
    let mut finals: FxHashMap<PlateAppearanceKey, &PitchEvent> = FxHashMap::default();
    for p in pitches {
        finals
            .entry(p.pa_key())
            .and_modify(|cur| {
                if p.pitch_of_pa >= cur.pitch_of_pa {
                    *cur = p;
                }
            })
            .or_insert(p);
    }
    finals
}

#[cfg(test)]
mod tests {
    use super::*;

    fn pitch(game: &str, inning: u8, half: HalfInning, pa: u16, n: u16) -> PitchEvent {
        PitchEvent::new(game, inning, half, pa, n)
    }

    fn dated(mut p: PitchEvent, y: i32, m: u32, d: u32) -> PitchEvent {
        p.date = NaiveDate::from_ymd_opt(y, m, d);
        p
    }

    #[test]
    fn test_group_orders_innings_and_pitches() {
        let input = vec![
            pitch("G", 2, HalfInning::Top, 1, 1),
            pitch("G", 1, HalfInning::Bottom, 1, 2),
            pitch("G", 1, HalfInning::Bottom, 1, 1),
            pitch("G", 1, HalfInning::Top, 2, 1),
            pitch("G", 1, HalfInning::Top, 1, 1),
        ];

        let innings = group(&input);
        let order: Vec<(u8, HalfInning)> = innings.iter().map(|i| (i.inning, i.half)).collect();
        assert_eq!(
            order,
            vec![(1, HalfInning::Top), (1, HalfInning::Bottom), (2, HalfInning::Top)]
        );

        let top1: Vec<u16> = innings[0].plate_appearances.iter().map(|pa| pa.pa_of_inning).collect();
        assert_eq!(top1, vec![1, 2]);

        let bottom1: Vec<u16> =
            innings[1].plate_appearances[0].pitches.iter().map(|p| p.pitch_of_pa).collect();
        assert_eq!(bottom1, vec![1, 2]);
    }

    #[test]
    fn test_group_is_lossless() {
        let input: Vec<PitchEvent> = (1..=3)
            .flat_map(|inning| {
                (1..=4).flat_map(move |pa| {
                    (1..=3).map(move |n| pitch("G", inning, HalfInning::Bottom, pa, n))
                })
            })
            .collect();

        let seasons = vec![Season {
            label: "2024".into(),
            games: vec![Game { game_id: "G".into(), date: None, innings: group(&input) }],
        }];
        let flat = flatten(&seasons);
        assert_eq!(flat.len(), input.len());
        assert_eq!(flat, input);
    }

    #[test]
    fn test_group_games_orders_by_date() {
        let input = vec![
            dated(pitch("B", 1, HalfInning::Top, 1, 1), 2024, 3, 10),
            dated(pitch("A", 1, HalfInning::Top, 1, 1), 2024, 3, 2),
            pitch("C", 1, HalfInning::Top, 1, 1),
        ];
        let games = group_games(&input);
        let ids: Vec<&str> = games.iter().map(|g| g.game_id.as_str()).collect();
        assert_eq!(ids, vec!["A", "B", "C"]);
    }

    #[test]
    fn test_group_seasons_puts_offseason_last() {
        let input = vec![
            dated(pitch("Summer", 1, HalfInning::Top, 1, 1), 2024, 7, 15),
            dated(pitch("Spring", 1, HalfInning::Top, 1, 1), 2024, 3, 2),
            dated(pitch("Fall", 1, HalfInning::Top, 1, 1), 2023, 10, 5),
        ];
        let seasons = group_seasons(&input);
        let labels: Vec<&str> = seasons.iter().map(|s| s.label.as_str()).collect();
        assert_eq!(labels, vec!["Preseason 2023-2024", "2024", OFFSEASON_LABEL]);
        assert_eq!(iter_pitches(&seasons).count(), 3);
    }

    #[test]
    fn test_final_pitch_per_plate_appearance() {
        let input = vec![
            pitch("G", 1, HalfInning::Top, 1, 1),
            pitch("G", 1, HalfInning::Top, 1, 3),
            pitch("G", 1, HalfInning::Top, 1, 2),
            pitch("G", 1, HalfInning::Top, 2, 1),
            pitch("H", 1, HalfInning::Top, 1, 1),
        ];
        let finals = final_pitches(&input);
        assert_eq!(finals.len(), 3);
        assert_eq!(finals[&input[0].pa_key()].pitch_of_pa, 3);
    }
}
