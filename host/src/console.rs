use std::io::{BufRead, Write};
use std::time::Duration;

use tycoon::{
    Board, ManagementAction, ManagementMenu, Player, PurchaseDecision, PurchaseOffer, Standing,
    TileKind, Ui,
};

/// Terminal presentation of the table. In interactive mode the decision
/// prompts read from stdin; with `auto` set they follow a fixed policy
/// (buy whatever is affordable, improve whenever legal, never mortgage),
/// which is what unattended runs and demos use.
pub struct ConsoleUi {
    auto: bool,
    step_delay: Duration,
}

impl ConsoleUi {
    pub fn new(auto: bool, step_delay: Duration) -> Self {
        Self { auto, step_delay }
    }

    fn prompt(&self, question: &str, options: &str) -> String {
        print!("{question} [{options}] ");
        let _ = std::io::stdout().flush();
        let mut line = String::new();
        let _ = std::io::stdin().lock().read_line(&mut line);
        line.trim().to_lowercase()
    }
}

impl Ui for ConsoleUi {
    fn render_board(&mut self, board: &Board) {
        println!("Board with {} tiles:", board.size());
        for tile in board.tiles() {
            let extra = match &tile.economics {
                Some(eco) => format!(" (${})", eco.price),
                None if tile.kind == TileKind::Tax => format!(" (tax ${})", tile.value.abs()),
                None => String::new(),
            };
            println!("  {:>2} {}{extra}", tile.id, tile.name);
        }
    }

    fn render_players(&mut self, players: &[Player]) {
        for player in players {
            println!(
                "  {} [{}] ${} at tile {}",
                player.nick, player.country, player.money, player.position
            );
        }
    }

    fn render_tokens(&mut self, _players: &[Player]) {
        // Token positions are repeated by refresh(); nothing extra to draw
        // per step on a terminal.
    }

    fn refresh(&mut self, _board: &Board, players: &[Player]) {
        let summary: Vec<String> = players
            .iter()
            .map(|p| {
                let jail = if p.in_jail { "*" } else { "" };
                format!("{}{jail}@{} ${}", p.nick, p.position, p.money)
            })
            .collect();
        println!("  [{}]", summary.join(" | "));
    }

    fn toast(&mut self, message: &str) {
        println!("{message}");
    }

    fn decide_purchase(&mut self, offer: &PurchaseOffer) -> PurchaseDecision {
        if self.auto {
            return if offer.funds >= offer.price {
                PurchaseDecision::Buy
            } else {
                PurchaseDecision::Decline
            };
        }
        let question = format!(
            "{}: buy \"{}\" for ${} (rent ${})?",
            offer.nick, offer.name, offer.price, offer.rent
        );
        match self.prompt(&question, "y/n").as_str() {
            "y" | "yes" => PurchaseDecision::Buy,
            _ => PurchaseDecision::Decline,
        }
    }

    fn decide_management(&mut self, menu: &ManagementMenu) -> ManagementAction {
        if self.auto {
            if menu.can_build_hotel {
                return ManagementAction::BuildHotel;
            }
            if menu.can_build_house {
                return ManagementAction::BuildHouse;
            }
            return ManagementAction::Pass;
        }
        let mut options = vec!["pass"];
        if menu.can_build_house {
            options.push("house");
        }
        if menu.can_build_hotel {
            options.push("hotel");
        }
        if menu.mortgaged {
            options.push("redeem");
        } else {
            options.push("mortgage");
        }
        let question = format!("Manage \"{}\"", menu.name);
        match self.prompt(&question, &options.join("/")).as_str() {
            "house" => ManagementAction::BuildHouse,
            "hotel" => ManagementAction::BuildHotel,
            "mortgage" => ManagementAction::Mortgage,
            "redeem" => ManagementAction::Redeem,
            _ => ManagementAction::Pass,
        }
    }

    fn show_standings(&mut self, standings: &[Standing]) {
        println!("\nFinal standings:");
        for (rank, standing) in standings.iter().enumerate() {
            println!(
                "  {}. {} [{}] {}",
                rank + 1,
                standing.nick,
                standing.country,
                standing.score
            );
        }
    }

    fn step_pause(&mut self) {
        if !self.step_delay.is_zero() {
            std::thread::sleep(self.step_delay);
        }
    }
}
