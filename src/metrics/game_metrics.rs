use std::time::{Duration, Instant};

use crate::game::RoundEnd;

/// Statistics for the current play session
pub struct GameMetrics {
    pub round_start: Instant,
    pub elapsed_time: Duration,
    pub high_score: u32,
    pub rounds_played: u32,
    pub boards_cleared: u32,
    pub food_eaten: u32,
    pub longest_snake: usize,
    round_active: bool,
}

impl GameMetrics {
    pub fn new() -> Self {
        Self {
            round_start: Instant::now(),
            elapsed_time: Duration::ZERO,
            high_score: 0,
            rounds_played: 0,
            boards_cleared: 0,
            food_eaten: 0,
            longest_snake: 0,
            round_active: false,
        }
    }

    /// Refresh the round clock; it stands still between rounds
    pub fn update(&mut self) {
        if self.round_active {
            self.elapsed_time = self.round_start.elapsed();
        }
    }

    pub fn on_round_start(&mut self) {
        self.round_start = Instant::now();
        self.elapsed_time = Duration::ZERO;
        self.round_active = true;
    }

    pub fn is_round_active(&self) -> bool {
        self.round_active
    }

    /// Record a meal; `snake_len` is the length the snake is growing to
    pub fn on_food_eaten(&mut self, snake_len: usize) {
        self.food_eaten += 1;
        self.longest_snake = self.longest_snake.max(snake_len);
    }

    pub fn on_round_end(&mut self, end: RoundEnd, final_score: u32) {
        self.update();
        self.round_active = false;
        self.rounds_played += 1;
        if end == RoundEnd::BoardCleared {
            self.boards_cleared += 1;
        }
        if final_score > self.high_score {
            self.high_score = final_score;
        }
    }

    pub fn format_time(&self) -> String {
        let total_secs = self.elapsed_time.as_secs();
        let minutes = total_secs / 60;
        let seconds = total_secs % 60;
        format!("{:02}:{:02}", minutes, seconds)
    }
}

impl Default for GameMetrics {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::game::CollisionType;

    #[test]
    fn test_time_formatting() {
        let mut metrics = GameMetrics::new();
        metrics.elapsed_time = Duration::from_secs(125);
        assert_eq!(metrics.format_time(), "02:05");

        metrics.elapsed_time = Duration::from_secs(0);
        assert_eq!(metrics.format_time(), "00:00");

        metrics.elapsed_time = Duration::from_secs(3661);
        assert_eq!(metrics.format_time(), "61:01");
    }

    #[test]
    fn test_high_score_tracking() {
        let mut metrics = GameMetrics::new();
        let wall = RoundEnd::Collision(CollisionType::Wall);

        metrics.on_round_end(wall, 10);
        assert_eq!(metrics.high_score, 10);
        assert_eq!(metrics.rounds_played, 1);

        metrics.on_round_end(wall, 5);
        assert_eq!(metrics.high_score, 10); // Should not decrease
        assert_eq!(metrics.rounds_played, 2);

        metrics.on_round_end(RoundEnd::BoardCleared, 15);
        assert_eq!(metrics.high_score, 15);
        assert_eq!(metrics.rounds_played, 3);
        assert_eq!(metrics.boards_cleared, 1);
    }

    #[test]
    fn test_food_tracking() {
        let mut metrics = GameMetrics::new();
        metrics.on_food_eaten(4);
        metrics.on_food_eaten(5);
        metrics.on_food_eaten(4);

        assert_eq!(metrics.food_eaten, 3);
        assert_eq!(metrics.longest_snake, 5);
    }

    #[test]
    fn test_clock_stops_between_rounds() {
        let mut metrics = GameMetrics::new();
        metrics.update();
        assert_eq!(metrics.elapsed_time, Duration::ZERO);

        metrics.on_round_start();
        std::thread::sleep(Duration::from_millis(50));
        metrics.update();
        assert!(metrics.elapsed_time.as_millis() >= 50);

        metrics.on_round_end(RoundEnd::Collision(CollisionType::SelfCollision), 0);
        let frozen = metrics.elapsed_time;
        std::thread::sleep(Duration::from_millis(20));
        metrics.update();
        assert_eq!(metrics.elapsed_time, frozen);
        assert!(!metrics.is_round_active());
    }
}
