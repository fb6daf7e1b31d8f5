//! Reference data offered by the profile form: the influence roster and the demo personas.

use crate::models::{ComedyStyle, UserProfile};

/// Comedians a user can pick as influences.
pub const TOP_COMEDIANS: &[&str] = &[
    "Dave Chappelle",
    "George Carlin",
    "Richard Pryor",
    "Robin Williams",
    "Eddie Murphy",
    "Jerry Seinfeld",
    "Chris Rock",
    "Louis C.K.",
    "Bill Burr",
    "Ricky Gervais",
    "Mitch Hedberg",
    "John Mulaney",
    "Kevin Hart",
    "Steve Martin",
    "Sarah Silverman",
    "Rodney Dangerfield",
    "Don Rickles",
    "Norm Macdonald",
    "Joan Rivers",
    "Patton Oswalt",
    "Jim Gaffigan",
    "Conan O'Brien",
    "Amy Schumer",
    "Aziz Ansari",
    "Ali Wong",
    "Bill Hicks",
    "Bo Burnham",
    "Tig Notaro",
    "Anthony Jeselnik",
    "Sebastian Maniscalco",
];

pub fn is_known_comedian(name: &str) -> bool {
    TOP_COMEDIANS.contains(&name)
}

/// A canned persona used to autofill the form.
#[derive(Debug, Clone, Copy)]
pub struct DemoProfile {
    pub title: &'static str,
    pub description: &'static str,
    pub name: &'static str,
    pub age: &'static str,
    pub occupation: &'static str,
    pub hometown: &'static str,
    pub style: ComedyStyle,
    pub topics: &'static str,
    pub context: &'static str,
    pub influences: &'static [&'static str],
}

impl DemoProfile {
    pub fn to_profile(&self) -> UserProfile {
        UserProfile {
            name: self.name.to_string(),
            age: self.age.to_string(),
            occupation: self.occupation.to_string(),
            hometown: self.hometown.to_string(),
            topics: self.topics.to_string(),
            context: self.context.to_string(),
            style: self.style,
            influences: self.influences.iter().map(|s| s.to_string()).collect(),
        }
    }
}

pub const DEMO_PROFILES: &[DemoProfile] = &[
    DemoProfile {
        title: "The Corporate Cynic",
        description: "A burned-out PM dealing with Jira tickets and dating apps.",
        name: "Chad GPT",
        age: "29",
        occupation: "Product Manager",
        hometown: "San Francisco, CA",
        style: ComedyStyle::Observational,
        topics: "Tech culture, rent prices, microdosing, meeting that could have been emails",
        context: "I spend 10 hours a day optimizing workflows but can't optimize my love life. \
                  I live with 4 roommates in a house that costs $8k a month. \
                  I'm vegan but only when people are watching.",
        influences: &["Ricky Gervais", "Bill Burr"],
    },
    DemoProfile {
        title: "The Overwhelmed Parent",
        description: "Surviving toddlers, wine culture, and minivan life.",
        name: "Linda",
        age: "38",
        occupation: "Stay-at-home Mom",
        hometown: "Suburban Chicago",
        style: ComedyStyle::SelfDeprecating,
        topics: "Tantrums, yoga pants, wine o'clock, husband's snoring",
        context: "I used to be cool. Now I get excited about a new sponge. \
                  My toddler negotiated a hostage situation with a cookie yesterday. \
                  I haven't slept since 2018.",
        influences: &["Jim Gaffigan", "Ali Wong"],
    },
    DemoProfile {
        title: "The Gen Z Nihilist",
        description: "Vibes, climate anxiety, and thrift stores.",
        name: "Kai",
        age: "22",
        occupation: "Barista / Content Creator",
        hometown: "Portland, OR",
        style: ComedyStyle::Absurdist,
        topics: "Climate change, thrifting, oat milk, generational trauma",
        context: "I work at a cafe where we judge you for ordering dairy. \
                  I own 12 plants and they are all dying, just like the planet. \
                  I make TikToks about my anxiety.",
        influences: &["Bo Burnham", "Mitch Hedberg"],
    },
];

#[cfg(test)]
mod tests {
    use std::collections::HashSet;

    use super::*;
    use crate::models::MAX_INFLUENCES;

    #[test]
    fn test_roster_has_no_duplicates() {
        let unique: HashSet<_> = TOP_COMEDIANS.iter().collect();
        assert_eq!(unique.len(), TOP_COMEDIANS.len());
        assert_eq!(TOP_COMEDIANS.len(), 30);
    }

    #[test]
    fn test_demo_influences_come_from_roster_and_respect_limit() {
        for demo in DEMO_PROFILES {
            assert!(demo.influences.len() <= MAX_INFLUENCES, "{}", demo.title);
            for name in demo.influences {
                assert!(is_known_comedian(name), "{name} not in roster");
            }
        }
    }

    #[test]
    fn test_demo_profiles_fill_required_fields() {
        for demo in DEMO_PROFILES {
            let profile = demo.to_profile();
            assert!(!profile.name.is_empty());
            assert!(!profile.age.is_empty());
            assert!(!profile.occupation.is_empty());
            assert!(!profile.hometown.is_empty());
            assert!(!profile.context.is_empty());
        }
    }

    #[test]
    fn test_continued_string_literals_keep_single_spaces() {
        let profile = DEMO_PROFILES[1].to_profile();
        assert!(profile.context.contains("cool. Now"));
        assert!(!profile.context.contains("  "));
    }
}
