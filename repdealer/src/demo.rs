//! In-process stand-in for the game host.
//!
//! Opens the dealer when the player presses `e` in the world, answers gives
//! after a random delay (or, some of the time, never), and re-sends the
//! catalog with the given card taken out of stock.

use std::time::{Duration, Instant};

use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};
use repdealer_core::{Card, ChannelError, Inbound, Outbound, OutboundSink, PlayerStats};
use tracing::{debug, info, warn};

use crate::link::HostLink;

const CARD_POOL: [(&str, &str, &str); 8] = [
    ("Grove Street Pass", "fa-leaf", "Green light on the block"),
    ("Vagos Token", "fa-crown", "Yellow gang's mark of respect"),
    ("Ballas Favor", "fa-gem", "Purple owes you one"),
    ("Triad Marker", "fa-fire", "A debt paid in jade"),
    ("Lost MC Patch", "fa-skull", "Ride with the Lost"),
    ("Cartel Seal", "fa-money-bill", "The plaza remembers"),
    ("Street Racer Tag", "fa-car", "Fastest on the strip"),
    ("Dock Union Chit", "fa-handshake", "Cargo moves quietly"),
];

/// Key that walks the player up to the dealer
pub const INTERACT_KEY: char = 'e';

pub struct DemoHost {
    rng: StdRng,
    silence_rate: f64,
    latency: (u64, u64),
    inventory: Vec<Card>,
    open: bool,
    queue: Vec<(Instant, Inbound)>,
}

impl DemoHost {
    pub fn new(seed: Option<u64>, silence_rate: f64) -> Self {
        let rng = match seed {
            Some(seed) => StdRng::seed_from_u64(seed),
            None => StdRng::from_entropy(),
        };
        Self {
            rng,
            silence_rate: sane_rate(silence_rate),
            latency: (200, 1500),
            inventory: Vec::new(),
            open: false,
            queue: Vec::new(),
        }
    }

    /// Answer delay range in milliseconds
    pub fn latency(mut self, min_ms: u64, max_ms: u64) -> Self {
        self.latency = (min_ms, max_ms.max(min_ms + 1));
        self
    }

    fn roll_inventory(&mut self) {
        let count = self.rng.gen_range(0..=CARD_POOL.len().min(6));
        let mut picks: Vec<usize> = (0..CARD_POOL.len()).collect();
        // partial shuffle
        for i in 0..count {
            let j = self.rng.gen_range(i..picks.len());
            picks.swap(i, j);
        }
        self.inventory = picks[..count]
            .iter()
            .map(|&i| {
                let (label, icon, description) = CARD_POOL[i];
                Card::new(label, self.rng.gen_range(1..=10) * 5)
                    .icon(icon)
                    .description(description)
                    .quantity(self.rng.gen_range(1..=4))
            })
            .collect();
    }

    fn stats(&self) -> PlayerStats {
        let available = self.inventory.iter().map(Card::stack_size).sum();
        let total_rep = self
            .inventory
            .iter()
            .map(|c| c.reputation_or_default() * c.stack_size())
            .sum();
        PlayerStats::new(available, total_rep)
    }

    fn show_message(&self) -> Inbound {
        Inbound::Show {
            cards: Some(self.inventory.clone()),
            stats: Some(self.stats()),
        }
    }

    fn enqueue(&mut self, due: Instant, message: Inbound) {
        self.queue.push((due, message));
        self.queue.sort_by_key(|(due, _)| *due);
    }

    /// Take one card out of stock at `index`
    fn consume(&mut self, index: usize) {
        let Some(card) = self.inventory.get_mut(index) else {
            return;
        };
        let left = card.stack_size().saturating_sub(1);
        if left == 0 {
            self.inventory.remove(index);
        } else {
            card.quantity = Some(left);
        }
    }

    /// Handle an outbound message as if it arrived at `now`
    pub fn receive(&mut self, message: &Outbound, now: Instant) {
        match message {
            Outbound::Close => {
                self.open = false;
                self.queue.retain(|(_, m)| !matches!(m, Inbound::Show { .. }));
                debug!("demo host saw close");
            }
            Outbound::GiveCard {
                card_index,
                card_data,
            } => {
                if self.rng.gen_bool(self.silence_rate) {
                    info!(index = card_index, "demo host staying silent");
                    return;
                }
                let delay = Duration::from_millis(self.rng.gen_range(self.latency.0..self.latency.1));
                self.consume(*card_index);
                info!(
                    index = card_index,
                    card = %card_data,
                    delay_ms = delay.as_millis() as u64,
                    "demo host accepting give"
                );
                let due = now + delay;
                self.enqueue(due, Inbound::Loading { show: false });
                if self.open {
                    let refresh = self.show_message();
                    self.enqueue(due, refresh);
                }
            }
        }
    }
}

/// Probability usable by `gen_bool`; anything non-finite counts as zero
fn sane_rate(rate: f64) -> f64 {
    if rate.is_finite() {
        rate.clamp(0.0, 1.0)
    } else {
        warn!(rate, "ignoring non-finite silence rate");
        0.0
    }
}

impl OutboundSink for DemoHost {
    fn deliver(&mut self, message: &Outbound) -> Result<(), ChannelError> {
        self.receive(message, Instant::now());
        Ok(())
    }
}

impl HostLink for DemoHost {
    fn try_recv(&mut self, now: Instant) -> Option<Inbound> {
        if self.queue.first().is_some_and(|(due, _)| *due <= now) {
            Some(self.queue.remove(0).1)
        } else {
            None
        }
    }

    fn environment_key(&mut self, key: char, now: Instant) {
        if key.to_ascii_lowercase() != INTERACT_KEY {
            debug!(%key, "player moved");
            return;
        }
        if self.open {
            return;
        }
        self.roll_inventory();
        self.open = true;
        info!(cards = self.inventory.len(), "demo host opening dealer");
        let show = self.show_message();
        self.enqueue(now, show);
    }

    fn name(&self) -> String {
        "demo".into()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn drain(host: &mut DemoHost, now: Instant) -> Vec<Inbound> {
        std::iter::from_fn(|| host.try_recv(now)).collect()
    }

    #[test]
    fn test_interact_opens_once() {
        let now = Instant::now();
        let mut host = DemoHost::new(Some(7), 0.0);
        host.environment_key('w', now);
        assert!(drain(&mut host, now).is_empty());

        host.environment_key('e', now);
        host.environment_key('E', now);
        let messages = drain(&mut host, now);
        assert_eq!(messages.len(), 1);
        assert!(matches!(messages[0], Inbound::Show { .. }));
        assert!(host.open);
    }

    #[test]
    fn test_give_answers_after_delay() {
        let now = Instant::now();
        let mut host = DemoHost::new(Some(3), 0.0).latency(100, 200);
        host.inventory = vec![Card::new("Vagos Token", 25).quantity(2)];
        host.open = true;

        let give = Outbound::GiveCard {
            card_index: 0,
            card_data: host.inventory[0].clone(),
        };
        host.receive(&give, now);
        assert!(host.try_recv(now).is_none());

        let later = now + Duration::from_millis(200);
        let messages = drain(&mut host, later);
        assert_eq!(messages.len(), 2);
        assert_eq!(messages[0], Inbound::Loading { show: false });
        match &messages[1] {
            Inbound::Show { cards, stats } => {
                assert_eq!(cards.as_ref().map(|c| c[0].stack_size()), Some(1));
                assert_eq!(*stats, Some(PlayerStats::new(1, 25)));
            }
            other => panic!("Expected Show, got {:?}", other),
        }
    }

    #[test]
    fn test_silent_host_queues_nothing() {
        let now = Instant::now();
        let mut host = DemoHost::new(Some(1), 1.0);
        host.inventory = vec![Card::new("Ballas Favor", 5)];
        host.open = true;
        host.receive(
            &Outbound::GiveCard {
                card_index: 0,
                card_data: Card::new("Ballas Favor", 5),
            },
            now,
        );
        assert_eq!(host.queue.len(), 0);
        assert_eq!(host.inventory.len(), 1);
    }

    #[test]
    fn test_non_finite_silence_rate_answers_normally() {
        let now = Instant::now();
        for rate in [f64::NAN, f64::INFINITY, f64::NEG_INFINITY] {
            let mut host = DemoHost::new(Some(5), rate);
            host.inventory = vec![Card::new("Cartel Seal", 20)];
            host.receive(
                &Outbound::GiveCard {
                    card_index: 0,
                    card_data: Card::new("Cartel Seal", 20),
                },
                now,
            );
            assert_eq!(host.queue.len(), 1);
        }
        assert_eq!(sane_rate(2.5), 1.0);
        assert_eq!(sane_rate(-1.0), 0.0);
    }

    #[test]
    fn test_close_drops_pending_refresh() {
        let now = Instant::now();
        let mut host = DemoHost::new(Some(9), 0.0);
        host.inventory = vec![Card::new("Triad Marker", 15)];
        host.open = true;
        host.receive(
            &Outbound::GiveCard {
                card_index: 0,
                card_data: Card::new("Triad Marker", 15),
            },
            now,
        );
        host.receive(&Outbound::Close, now);

        let messages = drain(&mut host, now + Duration::from_secs(5));
        assert_eq!(messages, vec![Inbound::Loading { show: false }]);
        assert!(!host.open);
        assert!(host.inventory.is_empty());
    }

    #[test]
    fn test_rolled_inventory_is_consistent() {
        let mut host = DemoHost::new(Some(42), 0.0);
        host.roll_inventory();
        let stats = host.stats();
        let count: u64 = host.inventory.iter().map(|c| c.stack_size()).sum();
        assert_eq!(stats.available, count);
        assert!(host.inventory.len() <= 6);
    }
}
