use serde::{Deserialize, Serialize};

use super::team::Team;

/// Role that is dealt in every game, whatever the configuration.
pub const ASSASSIN: &str = "Assassin";

pub const GOOD_LANCELOT: &str = "Good Lancelot";
pub const EVIL_LANCELOT: &str = "Evil Lancelot";

/// An optional role or rule variant a host can switch on for a session.
///
/// Most modules put one named role into the pool. Rule modules (currently
/// only the Lady of the Lake) change play without occupying a seat.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub enum Module {
    Merlin,
    Percival,
    Mordred,
    Morgana,
    Oberon,
    LadyOfTheLake,
    Cleric,
    JuniorMessenger,
    SeniorMessenger,
    EvilMessenger,
    GoodRogue,
    EvilRogue,
    GoodSorcerer,
    EvilSorcerer,
    Troublemaker,
    UntrustworthyServant,
    Apprentice,
    Lunatic,
    Brute,
    Revealer,
    Trickster,
}

impl Module {
    /// Every module, in catalogue order.
    pub const ALL: [Module; 21] = [
        Module::Merlin,
        Module::Percival,
        Module::Mordred,
        Module::Morgana,
        Module::Oberon,
        Module::LadyOfTheLake,
        Module::Cleric,
        Module::JuniorMessenger,
        Module::SeniorMessenger,
        Module::EvilMessenger,
        Module::GoodRogue,
        Module::EvilRogue,
        Module::GoodSorcerer,
        Module::EvilSorcerer,
        Module::Troublemaker,
        Module::UntrustworthyServant,
        Module::Apprentice,
        Module::Lunatic,
        Module::Brute,
        Module::Revealer,
        Module::Trickster,
    ];

    /// Name of the role this module deals, or `None` for rule modules.
    pub fn role_name(&self) -> Option<&'static str> {
        let name = match self {
            Self::Merlin => "Merlin",
            Self::Percival => "Percival",
            Self::Mordred => "Mordred",
            Self::Morgana => "Morgana",
            Self::Oberon => "Oberon",
            Self::LadyOfTheLake => return None,
            Self::Cleric => "Cleric",
            Self::JuniorMessenger => "Junior Messenger",
            Self::SeniorMessenger => "Senior Messenger",
            Self::EvilMessenger => "Evil Messenger",
            Self::GoodRogue => "Good Rogue",
            Self::EvilRogue => "Evil Rogue",
            Self::GoodSorcerer => "Good Sorcerer",
            Self::EvilSorcerer => "Evil Sorcerer",
            Self::Troublemaker => "Troublemaker",
            Self::UntrustworthyServant => "Untrustworthy Servant",
            Self::Apprentice => "Apprentice",
            Self::Lunatic => "Lunatic",
            Self::Brute => "Brute",
            Self::Revealer => "Revealer",
            Self::Trickster => "Trickster",
        };
        Some(name)
    }

    /// Team of the dealt role, or `None` for rule modules.
    pub fn team(&self) -> Option<Team> {
        match self {
            Self::LadyOfTheLake => None,
            Self::Merlin
            | Self::Percival
            | Self::Cleric
            | Self::JuniorMessenger
            | Self::SeniorMessenger
            | Self::GoodRogue
            | Self::GoodSorcerer
            | Self::Troublemaker
            | Self::UntrustworthyServant
            | Self::Apprentice => Some(Team::Good),
            Self::Mordred
            | Self::Morgana
            | Self::Oberon
            | Self::EvilMessenger
            | Self::EvilRogue
            | Self::EvilSorcerer
            | Self::Lunatic
            | Self::Brute
            | Self::Revealer
            | Self::Trickster => Some(Team::Evil),
        }
    }

    /// Label shown in listings: the role name, or the rule module's name.
    pub fn label(&self) -> &'static str {
        self.role_name().unwrap_or("Lady of the Lake")
    }

    /// Look up a module by its label or identifier, ignoring case and spaces:
    /// "Lady of the Lake", "ladyofthelake" and "LadyOfTheLake" all match.
    pub fn from_name(name: &str) -> Option<Module> {
        let wanted = compact_lowercase(name);
        if wanted.is_empty() {
            return None;
        }
        Module::ALL.into_iter().find(|m| {
            compact_lowercase(m.label()) == wanted || compact_lowercase(&format!("{:?}", m)) == wanted
        })
    }

    /// True for the five roles of the base box.
    pub fn is_base(&self) -> bool {
        matches!(
            self,
            Self::Merlin | Self::Percival | Self::Mordred | Self::Morgana | Self::Oberon
        )
    }

    /// One-line rules summary.
    pub fn description(&self) -> &'static str {
        match self {
            Self::Merlin => "Knows the agents of Evil, except Mordred; must stay hidden from the Assassin.",
            Self::Percival => "Knows Merlin and Morgana, but not which is which.",
            Self::Mordred => "Evil, hidden from Merlin.",
            Self::Morgana => "Evil, appears as Merlin to Percival.",
            Self::Oberon => "Evil, but unknown to the other agents of Evil and does not know them.",
            Self::LadyOfTheLake => "Loyalty checks after Quests 2 to 4; the token passes to the checked player.",
            Self::Cleric => "Learns the loyalty of the first Leader.",
            Self::JuniorMessenger => "Good messenger; known to the Senior Messenger.",
            Self::SeniorMessenger => "Good messenger; learns the Junior Messenger at setup.",
            Self::EvilMessenger => "Evil messenger; carries Evil Message cards.",
            Self::GoodRogue => "Good; may play a Rogue Success card.",
            Self::EvilRogue => "Evil, hidden from Evil and from Merlin; may play a Rogue Fail card.",
            Self::GoodSorcerer => "Good; may play Magic to reverse a Quest result.",
            Self::EvilSorcerer => "Evil; may play Magic but cannot play Fail.",
            Self::Troublemaker => "Good, but must lie about loyalty when checked.",
            Self::UntrustworthyServant => "Good; appears Evil to Merlin, learns the Assassin, may be recruited by Evil.",
            Self::Apprentice => "Good; may raise a second hand during Good's Last Chance.",
            Self::Lunatic => "Evil; must play Fail on every Quest.",
            Self::Brute => "Evil; may play Fail only on the first three Quests.",
            Self::Revealer => "Evil; reveals loyalty after the second failed Quest.",
            Self::Trickster => "Evil; may lie about loyalty when checked.",
        }
    }
}

fn compact_lowercase(s: &str) -> String {
    s.chars()
        .filter(|c| !c.is_whitespace())
        .flat_map(char::to_lowercase)
        .collect()
}

/// How the two Lancelots are played, if at all.
///
/// Both Lancelots are always dealt together, so they share one field instead
/// of two independent flags.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum LancelotMode {
    #[default]
    Off,
    /// The Lancelots open their eyes and see each other.
    Classic,
    /// The Lancelots stay unknown to each other; Evil Lancelot shows a thumb to Evil.
    Variant,
}

impl LancelotMode {
    pub fn is_active(&self) -> bool {
        !matches!(self, Self::Off)
    }
}
