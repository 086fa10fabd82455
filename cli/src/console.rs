use std::io::{BufRead, Write};

use skirmish::api::{describe, Decider, Stage};
use skirmish::interlude::{CampChoice, Choice, RandomEvent, ShopChoice, ShopItem, UpgradeChoice};
use skirmish::{Encounter, EncounterSnapshot, Hero, HeroAction, LogEntry, TurnInput};

/// Line-oriented text front end. `q` or end of input quits.
pub struct Console<R, W> {
    input: R,
    out: W,
}

impl<R: BufRead, W: Write> Console<R, W> {
    pub fn new(input: R, out: W) -> Self {
        Self { input, out }
    }

    pub fn say(&mut self, line: &str) {
        // A closed stdout only loses display; the game can still finish.
        let _ = writeln!(self.out, "{}", line);
    }

    fn read_line(&mut self) -> Option<String> {
        let mut line = String::new();
        match self.input.read_line(&mut line) {
            Ok(0) | Err(_) => None,
            Ok(_) => {
                let line = line.trim().to_string();
                if line.eq_ignore_ascii_case("q") { None } else { Some(line) }
            }
        }
    }

    /// Numbered menu; re-asks until a listed option is picked.
    fn ask(&mut self, prompt: &str, options: &[String]) -> Option<usize> {
        self.say(prompt);
        for (i, option) in options.iter().enumerate() {
            self.say(&format!("  {}) {}", i + 1, option));
        }
        loop {
            let _ = write!(self.out, "> ");
            let _ = self.out.flush();
            let line = self.read_line()?;
            match line.parse::<usize>() {
                Ok(n) if (1..=options.len()).contains(&n) => return Some(n - 1),
                _ => self.say(&format!("pick 1-{} or q", options.len())),
            }
        }
    }

    fn ask_pair(&mut self, prompt: &str, options: [&str; 2]) -> Option<Choice> {
        let options = options.map(str::to_string);
        self.ask(prompt, &options).and_then(Choice::from_index)
    }
}

impl<R: BufRead, W: Write> TurnInput for Console<R, W> {
    fn choose(&mut self, encounter: &Encounter<'_>) -> Option<HeroAction> {
        self.say(&describe(&encounter.snapshot()));
        let menu: Vec<String> = HeroAction::ALL
            .iter()
            .enumerate()
            .map(|(i, a)| format!("{}) {}", i + 1, a))
            .collect();
        let _ = write!(self.out, "{} > ", menu.join("  "));
        let _ = self.out.flush();
        let line = self.read_line()?;
        // Anything unrecognized is a plain attack.
        Some(HeroAction::parse_or_attack(&line))
    }

    fn observe(&mut self, entry: &LogEntry, _snapshot: &EncounterSnapshot) {
        self.say(&entry.to_string());
    }
}

impl<R: BufRead, W: Write> Decider for Console<R, W> {
    fn event_choice(&mut self, event: RandomEvent, _hero: &Hero) -> Option<Choice> {
        self.ask_pair(event.prompt(), event.options())
    }

    fn camp_choice(&mut self, _hero: &Hero) -> Option<CampChoice> {
        self.ask_pair("Camp. What now?", ["Rest (+30 HP)", "Fortify (+3 defense)"])
            .map(|c| match c {
                Choice::First => CampChoice::Rest,
                Choice::Second => CampChoice::Fortify,
            })
    }

    fn shop_choice(&mut self, offer: &[ShopItem], hero: &Hero) -> Option<ShopChoice> {
        let mut options: Vec<String> = offer.iter().map(ToString::to_string).collect();
        options.push("Leave".to_string());
        let idx = self.ask(&format!("Shop. Gold: {}", hero.gold), &options)?;
        Some(if idx < offer.len() { ShopChoice::Buy(idx) } else { ShopChoice::Leave })
    }

    fn upgrade_choice(&mut self, _hero: &Hero) -> Option<UpgradeChoice> {
        self.ask_pair("Choose an upgrade", ["+5 HP", "+2 attack"]).map(|c| match c {
            Choice::First => UpgradeChoice::Vitality,
            Choice::Second => UpgradeChoice::Might,
        })
    }

    fn notify(&mut self, stage: Stage, message: &str) {
        self.say(&format!("[{}] {}", stage.to_string().to_uppercase(), message));
    }
}
