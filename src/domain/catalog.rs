use crate::domain::model::Activity;
use crate::domain::video::VideoRef;
use serde::Serialize;

/// Static activity catalog. Insertion order is the matcher's output order.
#[derive(Debug, Clone)]
pub struct Catalog {
    activities: Vec<Activity>,
}

impl Catalog {
    pub fn new(activities: Vec<Activity>) -> Self {
        Self { activities }
    }

    pub fn builtin() -> Self {
        let activities = BUILTIN_GAMES
            .iter()
            .map(|(id, title, description, min_age, max_age, minutes, video_id, tags)| {
                Activity {
                    id: id.to_string(),
                    title: title.to_string(),
                    description: description.to_string(),
                    min_age: *min_age,
                    max_age: *max_age,
                    time_required_minutes: *minutes,
                    video: VideoRef::new(*video_id),
                    tags: tags.iter().map(|t| t.to_string()).collect(),
                }
            })
            .collect();
        Self::new(activities)
    }

    pub fn activities(&self) -> &[Activity] {
        &self.activities
    }

    pub fn get(&self, id: &str) -> Option<&Activity> {
        self.activities.iter().find(|activity| activity.id == id)
    }

    pub fn len(&self) -> usize {
        self.activities.len()
    }

    pub fn is_empty(&self) -> bool {
        self.activities.is_empty()
    }
}

impl Default for Catalog {
    fn default() -> Self {
        Self::builtin()
    }
}

type GameRow = (
    &'static str,
    &'static str,
    &'static str,
    i64,
    i64,
    i64,
    &'static str,
    &'static [&'static str],
);

const BUILTIN_GAMES: &[GameRow] = &[
    (
        "1",
        "Hide and Seek",
        "A classic game where one person counts while others hide, then tries to find them.",
        2,
        10,
        10,
        "MGKcmXAkXhQ",
        &["indoor", "outdoor", "active"],
    ),
    (
        "2",
        "Simon Says",
        "Follow the leader's instructions, but only when they start with 'Simon says'.",
        3,
        8,
        10,
        "lob3mrCjkCQ",
        &["indoor", "learning", "group"],
    ),
    (
        "3",
        "I Spy",
        "One player spots something and gives a clue, others try to guess what it is.",
        3,
        7,
        5,
        "gRW5qeWLwfY",
        &["indoor", "outdoor", "quiet", "travel"],
    ),
    (
        "4",
        "Musical Chairs",
        "Players walk around chairs while music plays, trying to sit when music stops.",
        4,
        10,
        15,
        "pDGTNBsovgw",
        &["indoor", "active", "group", "party"],
    ),
    (
        "5",
        "Freeze Dance",
        "Dance while the music plays, freeze when it stops!",
        2,
        8,
        10,
        "2UcZWXvgMZE",
        &["indoor", "active", "music"],
    ),
    (
        "6",
        "Balloon Keep Up",
        "Keep a balloon from touching the ground as long as possible.",
        2,
        6,
        5,
        "MjCEHbp0EZ0",
        &["indoor", "active", "simple"],
    ),
    (
        "7",
        "Red Light, Green Light",
        "Move on green light, freeze on red light. Don't get caught moving!",
        4,
        10,
        15,
        "iDlrN-OsI4Q",
        &["indoor", "outdoor", "active", "group"],
    ),
    (
        "8",
        "Scavenger Hunt",
        "Find items on a list within a time limit.",
        4,
        12,
        20,
        "6PKMZS-hWJM",
        &["indoor", "outdoor", "thinking", "active"],
    ),
    (
        "9",
        "Paper Airplane Race",
        "Fold paper airplanes and see whose flies the farthest.",
        5,
        12,
        15,
        "7KPaxKUDj6I",
        &["indoor", "creative", "science"],
    ),
    (
        "10",
        "Hopscotch",
        "Draw numbered squares, toss a marker, hop through without stepping on marker's square.",
        4,
        10,
        15,
        "9PA3RsVVdh8",
        &["outdoor", "active", "classic"],
    ),
    (
        "11",
        "Finger Painting",
        "Create art using fingers and washable paint.",
        1,
        5,
        20,
        "r2S5Fcc6-2o",
        &["indoor", "creative", "art", "messy"],
    ),
    (
        "12",
        "Duck, Duck, Goose",
        "Sit in a circle, one player taps heads saying 'duck' until saying 'goose', then runs.",
        3,
        8,
        10,
        "xvRARkOcI6c",
        &["indoor", "outdoor", "active", "group"],
    ),
];

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct BedtimeStory {
    pub id: String,
    pub title: String,
    pub video: VideoRef,
    pub duration: String,
}

pub fn bedtime_stories() -> Vec<BedtimeStory> {
    [
        ("1", "The Three Little Pigs", "QLR2pLUsl-s", "8 mins"),
        ("2", "Goldilocks and the Three Bears", "LDMWJCrDmxo", "10 mins"),
        ("3", "Little Red Riding Hood", "0W86K1jBJFI", "7 mins"),
        ("4", "Jack and the Beanstalk", "zurz-pL-uzw", "12 mins"),
    ]
    .into_iter()
    .map(|(id, title, video_id, duration)| BedtimeStory {
        id: id.to_string(),
        title: title.to_string(),
        video: VideoRef::new(video_id),
        duration: duration.to_string(),
    })
    .collect()
}
