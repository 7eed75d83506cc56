/// Narration compiler for the host's spoken reveal ritual.
///
/// The script is built from the configuration alone. Each reveal block opens
/// someone's eyes (or raises thumbs), lets them observe, and closes again
/// before the next block starts. Blocks whose modules are off are skipped.

use serde::{Deserialize, Serialize};

use crate::schema::config::ModuleConfiguration;
use crate::schema::module::{LancelotMode, Module, ASSASSIN, EVIL_LANCELOT};

pub const OPENING_LINE: &str = "Everyone, close your eyes and make a fist on the table.";
pub const CLOSING_LINE: &str = "Everyone, open your eyes. The game begins.";

/// Spoken steps plus host-only notes.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct NarrationScript {
    pub steps: Vec<String>,
    pub notes: Vec<String>,
}

impl NarrationScript {
    /// Steps as a numbered list, one per paragraph.
    pub fn render_steps(&self) -> String {
        self.steps
            .iter()
            .enumerate()
            .map(|(i, step)| format!("{}. {}", i + 1, step))
            .collect::<Vec<_>>()
            .join("\n\n")
    }
}

/// Join names as spoken English: "A", "A and B", "A, B and C".
pub fn join_names(names: &[&str]) -> String {
    match names {
        [] => String::new(),
        [only] => (*only).to_string(),
        [init @ .., last] => format!("{} and {}", init.join(", "), last),
    }
}

/// ", except A and B," or "," when nobody is excepted.
fn except_clause(names: &[&str]) -> String {
    if names.is_empty() {
        ",".to_string()
    } else {
        format!(", except {},", join_names(names))
    }
}

struct ScriptBuilder<'a> {
    config: &'a ModuleConfiguration,
    steps: Vec<String>,
    notes: Vec<String>,
}

impl<'a> ScriptBuilder<'a> {
    fn new(config: &'a ModuleConfiguration) -> Self {
        Self {
            config,
            steps: Vec::new(),
            notes: Vec::new(),
        }
    }

    fn has(&self, module: Module) -> bool {
        self.config.has(module)
    }

    fn say(&mut self, line: impl Into<String>) {
        self.steps.push(line.into());
    }

    fn note(&mut self, line: impl Into<String>) {
        self.notes.push(line.into());
    }

    /// Evil roles that keep their eyes closed during the Evil reveal.
    fn hidden_from_evil(&self) -> Vec<&'static str> {
        let mut hidden = Vec::new();
        if self.has(Module::Oberon) {
            hidden.push("Oberon");
        }
        if self.config.lancelot == LancelotMode::Variant {
            hidden.push(EVIL_LANCELOT);
        }
        if self.has(Module::EvilRogue) {
            hidden.push("Evil Rogue");
        }
        hidden
    }

    /// Evil roles that keep their thumbs down for Merlin.
    fn hidden_from_merlin(&self) -> Vec<&'static str> {
        let mut hidden = Vec::new();
        if self.has(Module::Mordred) {
            hidden.push("Mordred");
        }
        if self.has(Module::Oberon) {
            hidden.push("Oberon");
        }
        if self.has(Module::EvilRogue) {
            hidden.push("Evil Rogue");
        }
        hidden
    }

    /// Who raises a thumb for Percival.
    fn seen_by_percival(&self) -> Vec<&'static str> {
        let mut seen = Vec::new();
        if self.has(Module::Merlin) {
            seen.push("Merlin");
        }
        if self.has(Module::Morgana) {
            seen.push("Morgana");
        }
        seen
    }

    fn cleric_block(&mut self) {
        if !self.has(Module::Cleric) {
            return;
        }
        self.say("Leader, extend your thumb if you are Evil.");
        self.say("Cleric, open your eyes and see if the Leader is Good or Evil.");
        self.say("Cleric, close your eyes.");
        self.say("Leader, re-form your hand into a fist.");
    }

    fn evil_block(&mut self) {
        let hidden = self.hidden_from_evil();
        self.say(format!(
            "Minions of Mordred{} open your eyes and look around so that you know all agents of Evil.",
            except_clause(&hidden)
        ));
        let variant = self.config.lancelot == LancelotMode::Variant;
        if variant {
            self.say(format!(
                "{}, keep your eyes closed but extend your thumb so that the other agents of Evil may know you.",
                EVIL_LANCELOT
            ));
        }
        if self.has(Module::Oberon) {
            self.say("Reminder: Oberon, keep your eyes closed and do not reveal yourself.");
        }
        self.say("Minions of Mordred, close your eyes.");
        if variant {
            self.say(format!("{}, re-form your hand into a fist.", EVIL_LANCELOT));
        }
    }

    fn lancelot_block(&mut self) {
        if self.config.lancelot != LancelotMode::Classic {
            return;
        }
        self.say("Lancelots, open your eyes to reveal your counterpart.");
        self.say("Lancelots, close your eyes.");
    }

    fn merlin_block(&mut self) {
        if !self.has(Module::Merlin) {
            return;
        }
        let hidden = self.hidden_from_merlin();
        let servant = self.has(Module::UntrustworthyServant);
        self.say(format!(
            "Minions of Mordred{} extend your thumbs so that Merlin will know of you.",
            except_clause(&hidden)
        ));
        if servant {
            self.say("Untrustworthy Servant, also extend your thumb so that Merlin will think you are Evil.");
        }
        self.say("Merlin, open your eyes and see the raised thumbs.");
        self.say("Merlin, close your eyes.");
        if servant {
            self.say("Minions of Mordred and Untrustworthy Servant, put your thumbs down.");
        } else {
            self.say("Minions of Mordred, put your thumbs down.");
        }
    }

    fn percival_block(&mut self) {
        let seen = self.seen_by_percival();
        if !self.has(Module::Percival) || seen.is_empty() {
            return;
        }
        let who = join_names(&seen);
        let (thumbs, hands) = if seen.len() > 1 {
            ("thumbs", "hands into fists")
        } else {
            ("thumb", "hand into a fist")
        };
        self.say(format!(
            "{}, extend your {} so that Percival may know of you.",
            who, thumbs
        ));
        self.say(format!("Percival, open your eyes and see the raised {}.", thumbs));
        self.say("Percival, close your eyes.");
        self.say(format!("{}, re-form your {}.", who, hands));
    }

    fn messenger_block(&mut self) {
        if !(self.has(Module::SeniorMessenger) && self.has(Module::JuniorMessenger)) {
            return;
        }
        self.say("Junior Messenger, extend your thumb so that the Senior Messenger may know you.");
        self.say("Senior Messenger, open your eyes and see the raised thumb.");
        self.say("Senior Messenger, close your eyes.");
        self.say("Junior Messenger, re-form your hand into a fist.");
    }

    fn assassin_block(&mut self) {
        if !self.has(Module::UntrustworthyServant) {
            return;
        }
        self.say(format!(
            "{}, extend your thumb so that the Untrustworthy Servant may know you.",
            ASSASSIN
        ));
        self.say("Untrustworthy Servant, open your eyes and see the raised thumb.");
        self.say("Untrustworthy Servant, close your eyes.");
        self.say(format!("{}, re-form your hand into a fist.", ASSASSIN));
    }

    fn host_notes(&mut self) {
        let hidden = self.hidden_from_evil();
        if hidden.is_empty() {
            self.note("Evil reveal: every agent of Evil opens their eyes, including the Assassin.");
        } else {
            let described: Vec<&str> = hidden
                .iter()
                .map(|name| match *name {
                    EVIL_LANCELOT => "Evil Lancelot (thumb only)",
                    other => other,
                })
                .collect();
            self.note(format!(
                "Evil reveal skips {}; they stay unknown to the other agents of Evil.",
                join_names(&described)
            ));
        }

        if self.has(Module::Merlin) {
            let hidden = self.hidden_from_merlin();
            if hidden.is_empty() {
                self.note("Merlin sees every agent of Evil by their thumbs.");
            } else {
                self.note(format!(
                    "Merlin sees the agents of Evil by their thumbs, but not {}.",
                    join_names(&hidden)
                ));
            }
        }
        if self.has(Module::Percival) {
            let seen = self.seen_by_percival();
            let note = match seen.as_slice() {
                [] => "Percival has nobody to see; the Percival reveal is skipped.".to_string(),
                [only] if *only == "Morgana" => {
                    "Percival sees only Morgana and may take her for Merlin.".to_string()
                }
                [only] => format!("Percival sees {} alone.", only),
                _ => "Percival sees Merlin and Morgana but cannot tell which is which.".to_string(),
            };
            self.note(note);
        }
        if self.has(Module::Mordred) {
            self.note("Mordred opens their eyes with Evil but is hidden from Merlin.");
        }
        if self.has(Module::Morgana) {
            self.note("Morgana raises a thumb for Percival and appears to be Merlin.");
        }
        if self.has(Module::Oberon) {
            self.note("Oberon never opens their eyes; Evil does not know Oberon and Merlin never sees them.");
        }
        if self.has(Module::Cleric) {
            self.note("Cleric learns the first Leader's loyalty; pick the first Leader before the reveal.");
        }
        match self.config.lancelot {
            LancelotMode::Off => {}
            LancelotMode::Classic => self.note("Lancelots know each other (classic)."),
            LancelotMode::Variant => self.note(
                "Lancelots do not know each other; Evil Lancelot shows a thumb to Evil only (variant).",
            ),
        }
        if self.has(Module::LadyOfTheLake) {
            self.note("Lady of the Lake in play (loyalty checks after Quests 2 to 4).");
        }
        if self.has(Module::JuniorMessenger)
            || self.has(Module::SeniorMessenger)
            || self.has(Module::EvilMessenger)
        {
            if self.has(Module::JuniorMessenger) && self.has(Module::SeniorMessenger) {
                self.note("Messenger module in play (Good/Evil Message cards; Senior knows Junior via reveal).");
            } else {
                self.note("Messenger module in play (Good/Evil Message cards; no messenger reveal).");
            }
        }
        if self.has(Module::GoodRogue) || self.has(Module::EvilRogue) {
            self.note("Rogue module in play (Good Rogue Success / Evil Rogue Fail; watch the token).");
        }
        if self.has(Module::GoodSorcerer) || self.has(Module::EvilSorcerer) {
            self.note("Sorcerer module in play (Magic can reverse a Quest; Evil Sorcerer cannot play Fail).");
        }
        if self.has(Module::UntrustworthyServant) {
            self.note("Untrustworthy Servant appears Evil to Merlin, learns the Assassin, and may be recruited before the Assassination.");
        }
        if self.has(Module::Troublemaker) {
            self.note("Troublemaker must lie about their loyalty when checked (affects checks only).");
        }
        if self.has(Module::Trickster) {
            self.note("Trickster may lie about their loyalty when checked (affects checks only).");
        }
        if self.has(Module::Apprentice) {
            self.note("Apprentice raises one hand during Good's Last Chance and may raise a second after Evil is revealed.");
        }
        if self.has(Module::Lunatic) {
            self.note("Lunatic must play Fail on every Quest they are on.");
        }
        if self.has(Module::Brute) {
            self.note("Brute may play Fail only on the first three Quests.");
        }
        if self.has(Module::Revealer) {
            self.note("Revealer shows their loyalty after the second failed Quest.");
        }
    }

    fn finish(self) -> NarrationScript {
        NarrationScript {
            steps: self.steps,
            notes: self.notes,
        }
    }
}

/// Compile the reveal ritual for a configuration.
///
/// Never fails: works on half-edited or over-budget configurations too, so a
/// host can preview the script while toggling modules.
pub fn compile(config: &ModuleConfiguration) -> NarrationScript {
    let mut script = ScriptBuilder::new(config);

    script.say(OPENING_LINE);
    script.cleric_block();
    script.evil_block();
    script.lancelot_block();
    script.merlin_block();
    script.percival_block();
    script.messenger_block();
    script.assassin_block();
    script.say(CLOSING_LINE);

    script.host_notes();

    tracing::debug!(
        steps = script.steps.len(),
        notes = script.notes.len(),
        "compiled narration script"
    );
    script.finish()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn base_config(modules: &[Module]) -> ModuleConfiguration {
        ModuleConfiguration::new().with_all(modules)
    }

    fn position(script: &NarrationScript, needle: &str) -> usize {
        script
            .steps
            .iter()
            .position(|s| s.contains(needle))
            .unwrap_or_else(|| panic!("no step contains {:?}: {:#?}", needle, script.steps))
    }

    #[test]
    fn join_names_spoken_form() {
        assert_eq!(join_names(&[]), "");
        assert_eq!(join_names(&["Oberon"]), "Oberon");
        assert_eq!(join_names(&["Mordred", "Oberon"]), "Mordred and Oberon");
        assert_eq!(
            join_names(&["Mordred", "Oberon", "Evil Rogue"]),
            "Mordred, Oberon and Evil Rogue"
        );
    }

    #[test]
    fn minimal_script() {
        let script = compile(&ModuleConfiguration::new());
        assert_eq!(
            script.steps,
            vec![
                OPENING_LINE,
                "Minions of Mordred, open your eyes and look around so that you know all agents of Evil.",
                "Minions of Mordred, close your eyes.",
                CLOSING_LINE,
            ]
        );
        assert_eq!(script.notes.len(), 1);
    }

    #[test]
    fn opens_and_closes_globally() {
        let script = compile(&base_config(&[Module::Merlin, Module::Cleric, Module::Percival]));
        assert_eq!(script.steps.first().map(String::as_str), Some(OPENING_LINE));
        assert_eq!(script.steps.last().map(String::as_str), Some(CLOSING_LINE));
    }

    #[test]
    fn merlin_block_excludes_selected_hidden_roles() {
        let script = compile(&base_config(&[
            Module::Merlin,
            Module::Mordred,
            Module::Oberon,
            Module::EvilRogue,
        ]));
        assert!(script.steps.contains(
            &"Minions of Mordred, except Mordred, Oberon and Evil Rogue, extend your thumbs so that Merlin will know of you."
                .to_string()
        ));
    }

    #[test]
    fn merlin_block_without_exceptions() {
        let script = compile(&base_config(&[Module::Merlin]));
        assert!(script.steps.contains(
            &"Minions of Mordred, extend your thumbs so that Merlin will know of you.".to_string()
        ));
        assert!(script
            .steps
            .contains(&"Minions of Mordred, put your thumbs down.".to_string()));
    }

    #[test]
    fn untrustworthy_servant_joins_merlin_thumbs() {
        let script = compile(&base_config(&[Module::Merlin, Module::UntrustworthyServant]));
        let raise = position(&script, "Untrustworthy Servant, also extend");
        let merlin_open = position(&script, "Merlin, open your eyes");
        assert!(raise < merlin_open);
        assert!(script.steps.contains(
            &"Minions of Mordred and Untrustworthy Servant, put your thumbs down.".to_string()
        ));
    }

    #[test]
    fn evil_reveal_skips_hidden_roles() {
        let config = base_config(&[Module::Oberon, Module::EvilRogue])
            .with_lancelot(LancelotMode::Variant);
        let script = compile(&config);
        assert_eq!(
            script.steps[1],
            "Minions of Mordred, except Oberon, Evil Lancelot and Evil Rogue, open your eyes and look around so that you know all agents of Evil."
        );
        let thumb = position(&script, "Evil Lancelot, keep your eyes closed");
        let close = position(&script, "Minions of Mordred, close your eyes.");
        let fist = position(&script, "Evil Lancelot, re-form your hand");
        assert!(thumb < close && close < fist);
        assert!(script.steps.iter().any(|s| s.starts_with("Reminder: Oberon")));
    }

    #[test]
    fn classic_lancelots_reveal_after_evil() {
        let config = ModuleConfiguration::new().with_lancelot(LancelotMode::Classic);
        let script = compile(&config);
        let evil_close = position(&script, "Minions of Mordred, close your eyes.");
        let open = position(&script, "Lancelots, open your eyes");
        let close = position(&script, "Lancelots, close your eyes.");
        assert!(evil_close < open && open < close);
        assert!(script.notes.contains(&"Lancelots know each other (classic).".to_string()));
    }

    #[test]
    fn variant_lancelots_have_no_mutual_reveal() {
        let script = compile(&ModuleConfiguration::new().with_lancelot(LancelotMode::Variant));
        assert!(script.steps.iter().all(|s| !s.starts_with("Lancelots")));
    }

    #[test]
    fn percival_sees_both_signals() {
        let script = compile(&base_config(&[Module::Merlin, Module::Percival, Module::Morgana]));
        assert!(script.steps.contains(
            &"Merlin and Morgana, extend your thumbs so that Percival may know of you.".to_string()
        ));
        assert!(script
            .steps
            .contains(&"Merlin and Morgana, re-form your hands into fists.".to_string()));
    }

    #[test]
    fn percival_sees_single_signal() {
        let script = compile(&base_config(&[Module::Percival, Module::Morgana]));
        assert!(script.steps.contains(
            &"Morgana, extend your thumb so that Percival may know of you.".to_string()
        ));
        assert!(script
            .steps
            .contains(&"Percival, open your eyes and see the raised thumb.".to_string()));
    }

    #[test]
    fn percival_block_skipped_without_signals() {
        let script = compile(&base_config(&[Module::Percival]));
        assert!(script.steps.iter().all(|s| !s.contains("Percival")));
        assert!(script
            .notes
            .contains(&"Percival has nobody to see; the Percival reveal is skipped.".to_string()));
    }

    #[test]
    fn messenger_reveal_needs_both_messengers() {
        let senior_only = compile(&base_config(&[Module::SeniorMessenger]));
        assert!(senior_only.steps.iter().all(|s| !s.contains("Messenger")));

        let both = compile(&base_config(&[Module::SeniorMessenger, Module::JuniorMessenger]));
        let raise = position(&both, "Junior Messenger, extend your thumb");
        let open = position(&both, "Senior Messenger, open your eyes");
        let close = position(&both, "Senior Messenger, close your eyes.");
        assert!(raise < open && open < close);
    }

    #[test]
    fn untrustworthy_servant_learns_assassin_last() {
        let config = base_config(&[
            Module::Merlin,
            Module::Percival,
            Module::UntrustworthyServant,
            Module::SeniorMessenger,
            Module::JuniorMessenger,
        ]);
        let script = compile(&config);
        let messengers = position(&script, "Senior Messenger, close your eyes.");
        let assassin = position(&script, "Assassin, extend your thumb");
        let servant_close = position(&script, "Untrustworthy Servant, close your eyes.");
        assert!(messengers < assassin && assassin < servant_close);
        assert_eq!(script.steps.len() - 1, position(&script, CLOSING_LINE));
    }

    #[test]
    fn blocks_follow_dependency_order() {
        let config = base_config(&[
            Module::Cleric,
            Module::Merlin,
            Module::Percival,
            Module::Morgana,
            Module::SeniorMessenger,
            Module::JuniorMessenger,
            Module::UntrustworthyServant,
        ])
        .with_lancelot(LancelotMode::Classic);
        let script = compile(&config);
        let order = [
            position(&script, "Cleric, open your eyes"),
            position(&script, "look around so that you know all agents of Evil"),
            position(&script, "Lancelots, open your eyes"),
            position(&script, "Merlin, open your eyes"),
            position(&script, "Percival, open your eyes"),
            position(&script, "Senior Messenger, open your eyes"),
            position(&script, "Untrustworthy Servant, open your eyes"),
        ];
        assert!(order.windows(2).all(|w| w[0] < w[1]), "order: {:?}", order);
    }

    #[test]
    fn cleric_block_comes_first() {
        let script = compile(&base_config(&[Module::Cleric]));
        assert_eq!(script.steps[1], "Leader, extend your thumb if you are Evil.");
        assert_eq!(script.steps[4], "Leader, re-form your hand into a fist.");
    }

    #[test]
    fn one_note_per_active_module() {
        let script = compile(&base_config(&[
            Module::Lunatic,
            Module::Brute,
            Module::Revealer,
            Module::Trickster,
            Module::Troublemaker,
        ]));
        // Evil reveal summary plus one per module.
        assert_eq!(script.notes.len(), 6);
        assert!(script.notes.iter().any(|n| n.starts_with("Trickster may lie")));
        assert!(script.notes.iter().any(|n| n.starts_with("Troublemaker must lie")));
    }

    #[test]
    fn merlin_note_names_hidden_roles() {
        let script = compile(&base_config(&[Module::Merlin, Module::Mordred]));
        assert!(script
            .notes
            .contains(&"Merlin sees the agents of Evil by their thumbs, but not Mordred.".to_string()));
    }

    #[test]
    fn compile_is_deterministic() {
        let config = base_config(&[Module::Merlin, Module::Percival, Module::Oberon, Module::Cleric])
            .with_lancelot(LancelotMode::Variant);
        assert_eq!(compile(&config), compile(&config));
    }

    #[test]
    fn render_steps_numbers_lines() {
        let script = compile(&ModuleConfiguration::new());
        let rendered = script.render_steps();
        assert!(rendered.starts_with("1. Everyone, close your eyes"));
        assert!(rendered.ends_with("4. Everyone, open your eyes. The game begins."));
    }
}
