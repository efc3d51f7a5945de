use crossterm::style::Color;
use rand::prelude::SliceRandom;
use rand::Rng;

use super::particles::{
    random_bright_color, EffectType, Particle, CONFETTI_CHARS, SPARKLE_CHARS,
};

const WIN_MESSAGES: [&str; 8] = [
    "PUZZLE SOLVED!",
    "EVERY TILE HOME!",
    "BRILLIANT!",
    "PERFECT SLIDE!",
    "CHAMPION!",
    "FLAWLESS!",
    "WELL DONE!",
    "MAGNIFICENT!",
];

/// The animated solved screen
pub struct WinScreen {
    particles: Vec<Particle>,
    effect_type: EffectType,
    frame_count: u32,
    message_index: usize,
    firework_cooldown: u32,
    pub width: u16,
    pub height: u16,
}

impl WinScreen {
    pub fn new() -> Self {
        let mut rng = rand::thread_rng();
        Self {
            particles: Vec::new(),
            effect_type: EffectType::random(),
            frame_count: 0,
            message_index: rng.gen_range(0..WIN_MESSAGES.len()),
            firework_cooldown: 0,
            width: 80,
            height: 24,
        }
    }

    pub fn reset(&mut self) {
        let mut rng = rand::thread_rng();
        self.particles.clear();
        self.frame_count = 0;
        self.effect_type = EffectType::random();
        self.message_index = rng.gen_range(0..WIN_MESSAGES.len());
    }

    pub fn resize(&mut self, width: u16, height: u16) {
        self.width = width;
        self.height = height;
    }

    pub fn update(&mut self) {
        self.frame_count += 1;

        // Switch effects periodically
        if self.frame_count % 300 == 0 {
            self.effect_type = EffectType::random();
        }

        self.particles.retain_mut(|p| {
            p.x += p.vx;
            p.y += p.vy;
            p.vy += 0.15; // Gravity
            p.lifetime -= 0.016;
            p.lifetime > 0.0 && p.y < self.height as f32 + 5.0
        });

        match self.effect_type {
            EffectType::Confetti => self.spawn_confetti(),
            EffectType::Fireworks => self.spawn_fireworks(),
            EffectType::Sparkles => self.spawn_sparkles(),
        }
    }

    fn spawn_confetti(&mut self) {
        let mut rng = rand::thread_rng();
        for _ in 0..3 {
            self.particles.push(Particle {
                x: rng.gen_range(0.0..self.width as f32),
                y: -2.0,
                vx: rng.gen_range(-0.5..0.5),
                vy: rng.gen_range(0.3..1.0),
                char: *CONFETTI_CHARS.choose(&mut rng).unwrap(),
                color: random_bright_color(),
                lifetime: rng.gen_range(3.0..6.0),
            });
        }
    }

    fn spawn_fireworks(&mut self) {
        if self.firework_cooldown > 0 {
            self.firework_cooldown -= 1;
            return;
        }

        let mut rng = rand::thread_rng();
        if rng.gen_bool(0.08) {
            let x = rng.gen_range(10.0..(self.width as f32 - 10.0).max(11.0));
            let y = rng.gen_range(5.0..(self.height as f32 / 2.0).max(6.0));
            let color = random_bright_color();

            for _ in 0..20 {
                let angle = rng.gen_range(0.0..std::f32::consts::TAU);
                let speed = rng.gen_range(0.5..2.0);
                self.particles.push(Particle {
                    x,
                    y,
                    vx: angle.cos() * speed,
                    vy: angle.sin() * speed,
                    char: '●',
                    color,
                    lifetime: rng.gen_range(1.0..2.5),
                });
            }
            self.firework_cooldown = 15;
        }
    }

    fn spawn_sparkles(&mut self) {
        let mut rng = rand::thread_rng();
        for _ in 0..4 {
            self.particles.push(Particle {
                x: rng.gen_range(0.0..self.width as f32),
                y: rng.gen_range(0.0..self.height as f32),
                vx: rng.gen_range(-0.2..0.2),
                vy: rng.gen_range(-0.2..0.2),
                char: *SPARKLE_CHARS.choose(&mut rng).unwrap(),
                color: Color::Rgb {
                    r: 255,
                    g: 255,
                    b: rng.gen_range(150..255),
                },
                lifetime: rng.gen_range(0.5..1.5),
            });
        }
    }

    pub fn particles(&self) -> &[Particle] {
        &self.particles
    }

    pub fn current_message(&self) -> &str {
        WIN_MESSAGES[self.message_index]
    }
}

impl Default for WinScreen {
    fn default() -> Self {
        Self::new()
    }
}
