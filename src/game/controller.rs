use log::{debug, error, info};
use std::collections::VecDeque;

use super::{
    config::GameConfig,
    direction::{Direction, DirectionalInput},
    error::{GameError, GameResult},
    food::{Food, RandomCellSource, SeededCells},
    position::Position,
    snake::Snake,
    state::{CollisionType, GameState, Phase, RoundEnd},
    ticker::Ticker,
};

/// One-shot sound the presentation layer should play
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SoundCue {
    /// Food was eaten
    Eat,
    /// The snake hit a wall or itself
    Collide,
}

/// Information about a tick
#[derive(Debug, Clone, Default, PartialEq)]
pub struct StepInfo {
    /// Whether the snake ate food this tick
    pub ate_food: bool,
    /// Type of collision if one occurred
    pub collision_type: Option<CollisionType>,
    /// Set when the tick finished the round
    pub round_end: Option<RoundEnd>,
}

impl StepInfo {
    /// Sound cues triggered by this tick, in the order they happened
    pub fn cues(&self) -> impl Iterator<Item = SoundCue> {
        let eat = self.ate_food.then_some(SoundCue::Eat);
        let collide = self.collision_type.map(|_| SoundCue::Collide);
        eat.into_iter().chain(collide)
    }
}

/// The game controller: owns the snake, the food and the round state
#[derive(Debug)]
pub struct Game {
    config: GameConfig,
    snake: Snake,
    food: Food,
    state: GameState,
}

impl Game {
    /// Create a game whose food placement is seeded from `config.seed`
    pub fn new(config: GameConfig) -> GameResult<Self> {
        let source = match config.seed {
            Some(seed) => SeededCells::new(seed),
            None => SeededCells::from_entropy(),
        };
        Self::with_source(config, Box::new(source))
    }

    /// Create a game drawing food cells from `source`
    pub fn with_source(
        config: GameConfig,
        source: Box<dyn RandomCellSource>,
    ) -> GameResult<Self> {
        config.validate()?;

        let snake = Snake::new(
            config.start_layout(),
            Some(Direction::Right),
            config.turn_buffer,
        );
        let food = Food::new(
            config.grid_width,
            config.grid_height,
            config.max_placement_attempts,
            source,
            snake.cells(),
        )?;
        let ticker = Ticker::new(
            config.initial_interval,
            config.interval_decrement,
            config.interval_floor,
        );

        Ok(Self {
            config,
            snake,
            food,
            state: GameState::new(ticker),
        })
    }

    pub fn config(&self) -> &GameConfig {
        &self.config
    }

    pub fn state(&self) -> &GameState {
        &self.state
    }

    pub fn phase(&self) -> Phase {
        self.state.phase
    }

    pub fn is_running(&self) -> bool {
        self.state.is_running()
    }

    pub fn score(&self) -> u32 {
        self.state.score
    }

    /// Seconds between ticks at the current speed
    pub fn interval(&self) -> f64 {
        self.state.ticker.interval()
    }

    pub fn snake(&self) -> &Snake {
        &self.snake
    }

    pub fn snake_mut(&mut self) -> &mut Snake {
        &mut self.snake
    }

    /// Snake cells to draw, head first
    pub fn snake_cells(&self) -> &VecDeque<Position> {
        self.snake.cells()
    }

    /// Cell holding the food
    pub fn food(&self) -> Position {
        self.food.position()
    }

    pub fn food_mut(&mut self) -> &mut Food {
        &mut self.food
    }

    /// Apply one frame of directional input
    ///
    /// Keys are interpreted in the order up, down, right, left. Every accepted
    /// turn starts the game; with the default single-slot turn buffer the last
    /// accepted key sets the direction for the next tick. Returns true if any
    /// key was accepted.
    pub fn handle_input(&mut self, input: DirectionalInput) -> bool {
        let mut accepted = false;
        for direction in input.pressed_directions() {
            accepted |= self.turn(direction);
        }
        accepted
    }

    /// Steer the snake; an accepted turn starts a halted game
    pub fn turn(&mut self, direction: Direction) -> bool {
        if !self.snake.set_direction(direction) {
            debug!("ignored turn {:?}: snake would reverse", direction);
            return false;
        }

        if self.state.phase == Phase::Halted {
            info!("round started heading {:?}", direction);
        }
        self.state.phase = Phase::Running;
        true
    }

    /// Advance the simulation if the tick clock says a tick is due
    ///
    /// `now` is monotonic time in seconds. Returns the tick's outcome, or
    /// `None` when no tick ran (not due yet, or halted).
    pub fn update(&mut self, now: f64) -> Option<StepInfo> {
        if !self.state.ticker.poll(now) || !self.state.is_running() {
            return None;
        }
        Some(self.step())
    }

    /// Run one tick immediately: move, then check food, walls and body
    ///
    /// Does nothing while halted.
    pub fn step(&mut self) -> StepInfo {
        let mut info = StepInfo::default();
        if !self.state.is_running() {
            return info;
        }

        self.snake.tick();

        match self.check_food_collision() {
            Ok(ate_food) => info.ate_food = ate_food,
            Err(GameError::BoardFull { .. }) => {
                info.ate_food = true;
                info.round_end = Some(RoundEnd::BoardCleared);
                self.end_round(RoundEnd::BoardCleared);
                return info;
            }
            Err(err) => {
                error!("unexpected error while placing food: {err}");
            }
        }

        if let Some(collision) = self.check_collision() {
            info.collision_type = Some(collision);
            info.round_end = Some(RoundEnd::Collision(collision));
            self.end_round(RoundEnd::Collision(collision));
        }

        info
    }

    /// Eat the food if the head is on it
    fn check_food_collision(&mut self) -> GameResult<bool> {
        if self.snake.head() != self.food.position() {
            return Ok(false);
        }

        self.snake.grow();
        self.state.score += 1;
        self.state.ticker.speed_up();
        debug!(
            "ate food at {:?}, score {}, interval {:.3}s",
            self.food.position(),
            self.state.score,
            self.state.ticker.interval()
        );

        self.food.relocate(self.snake.cells())?;
        Ok(true)
    }

    /// Wall first, then the snake's own body
    fn check_collision(&self) -> Option<CollisionType> {
        if !self
            .snake
            .head()
            .is_within(self.config.grid_width, self.config.grid_height)
        {
            return Some(CollisionType::Wall);
        }

        if self.snake.bites_itself() {
            return Some(CollisionType::SelfCollision);
        }

        None
    }

    /// Reset the board after a game over or a cleared board
    fn end_round(&mut self, end: RoundEnd) {
        info!(
            "round over ({:?}) with score {} and length {}",
            end,
            self.state.score,
            self.snake.len()
        );

        self.snake.reset();
        if let Err(err) = self.food.relocate(self.snake.cells()) {
            error!("could not place food after reset: {err}");
        }

        self.state.last_round = Some(end);
        self.state.last_score = self.state.score;
        self.state.phase = Phase::Halted;
        self.state.score = 0;
        if self.config.reset_speed_on_game_over {
            self.state.ticker.reset_speed();
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn game() -> Game {
        let config = GameConfig {
            seed: Some(1),
            ..Default::default()
        };
        let mut game = Game::new(config).unwrap();
        game.food_mut().set_position(Position::new(39, 29));
        game
    }

    fn body(game: &Game) -> Vec<Position> {
        game.snake_cells().iter().copied().collect()
    }

    #[test]
    fn test_new_game_is_halted() {
        let game = game();
        assert_eq!(game.phase(), Phase::Halted);
        assert_eq!(game.score(), 0);
        assert_eq!(game.interval(), 0.20);
        assert_eq!(
            body(&game),
            vec![Position::new(9, 10), Position::new(8, 10), Position::new(7, 10)]
        );
    }

    #[test]
    fn test_initial_food_is_off_the_snake() {
        for seed in 0..50 {
            let game = Game::new(GameConfig {
                seed: Some(seed),
                ..GameConfig::small()
            })
            .unwrap();
            assert!(!game.snake_cells().contains(&game.food()));
        }
    }

    #[test]
    fn test_halted_game_does_not_tick() {
        let mut game = game();
        assert_eq!(game.update(1.0), None);
        assert_eq!(game.step(), StepInfo::default());
        assert_eq!(game.snake().head(), Position::new(9, 10));
    }

    #[test]
    fn test_input_starts_game() {
        let mut game = game();
        assert!(game.handle_input(DirectionalInput::pressed(Direction::Up)));
        assert_eq!(game.phase(), Phase::Running);
        assert_eq!(game.snake().direction(), Some(Direction::Up));
    }

    #[test]
    fn test_last_accepted_key_in_a_frame_wins() {
        let mut game = game();
        let mut input = DirectionalInput::pressed(Direction::Up);
        input.press(Direction::Right);

        assert!(game.handle_input(input));
        assert_eq!(game.snake().direction(), Some(Direction::Right));

        game.step();
        assert_eq!(game.snake().head(), Position::new(10, 10));
    }

    #[test]
    fn test_opt_in_turn_queue_spreads_keys_over_ticks() {
        let config = GameConfig {
            seed: Some(4),
            turn_buffer: 2,
            ..Default::default()
        };
        let mut game = Game::new(config).unwrap();
        game.food_mut().set_position(Position::new(39, 29));
        let mut input = DirectionalInput::pressed(Direction::Up);
        input.press(Direction::Left);

        assert!(game.handle_input(input));
        game.step();
        assert_eq!(game.snake().head(), Position::new(9, 9));
        game.step();
        assert_eq!(game.snake().head(), Position::new(8, 9));
    }

    #[test]
    fn test_reverse_input_does_not_start_game() {
        let mut game = game();
        assert!(!game.handle_input(DirectionalInput::pressed(Direction::Left)));
        assert_eq!(game.phase(), Phase::Halted);
    }

    #[test]
    fn test_update_is_gated_by_interval() {
        let mut game = game();
        game.turn(Direction::Right);

        assert_eq!(game.update(0.1), None);
        assert!(game.update(0.2).is_some());
        assert_eq!(game.snake().head(), Position::new(10, 10));
        assert_eq!(game.update(0.3), None);
        assert!(game.update(0.45).is_some());
        assert_eq!(game.snake().head(), Position::new(11, 10));
    }

    #[test]
    fn test_food_consumption() {
        let mut game = game();
        game.turn(Direction::Right);
        game.food_mut().set_position(Position::new(10, 10));

        let info = game.step();

        assert!(info.ate_food);
        assert_eq!(info.cues().collect::<Vec<_>>(), vec![SoundCue::Eat]);
        assert_eq!(game.score(), 1);
        assert!(game.snake().is_growing());
        assert!((game.interval() - 0.195).abs() < 1e-9);
        assert!(!game.snake_cells().contains(&game.food()));

        game.food_mut().set_position(Position::new(39, 29));
        game.step();
        assert_eq!(game.snake().len(), 4);
    }

    #[test]
    fn test_interval_floor() {
        let config = GameConfig {
            seed: Some(2),
            interval_decrement: 0.06,
            ..Default::default()
        };
        let mut game = Game::new(config).unwrap();
        game.turn(Direction::Down);

        for _ in 0..5 {
            let next = game.snake().head().moved_in_direction(Direction::Down);
            game.food_mut().set_position(next);
            assert!(game.step().ate_food);
        }

        assert_eq!(game.score(), 5);
        assert_eq!(game.interval(), 0.05);
    }

    #[test]
    fn test_wall_collision() {
        let mut game = game();
        game.turn(Direction::Up);
        for _ in 0..10 {
            game.step();
        }
        assert_eq!(game.snake().head(), Position::new(9, 0));
        assert!(game.is_running());

        let info = game.step();

        assert_eq!(info.collision_type, Some(CollisionType::Wall));
        assert_eq!(info.cues().collect::<Vec<_>>(), vec![SoundCue::Collide]);
        assert_eq!(game.phase(), Phase::Halted);
        assert_eq!(
            game.state().last_round,
            Some(RoundEnd::Collision(CollisionType::Wall))
        );
        assert_eq!(game.snake().direction(), None);
    }

    #[test]
    fn test_self_collision() {
        let mut game = game();
        game.snake_mut().set_body(
            [
                Position::new(5, 5),
                Position::new(4, 5),
                Position::new(3, 5),
                Position::new(2, 5),
                Position::new(1, 5),
            ],
            Some(Direction::Right),
        );
        game.turn(Direction::Right);

        // Right: (6,5) (5,5) (4,5) (3,5) (2,5)
        game.step();
        // Down: (6,6) (6,5) (5,5) (4,5) (3,5)
        game.turn(Direction::Down);
        game.step();
        // Left: (5,6) (6,6) (6,5) (5,5) (4,5)
        game.turn(Direction::Left);
        game.step();
        // Up lands on (5,5), which is still body
        game.turn(Direction::Up);
        let info = game.step();

        assert_eq!(info.collision_type, Some(CollisionType::SelfCollision));
        assert_eq!(game.phase(), Phase::Halted);
    }

    #[test]
    fn test_following_the_tail_is_safe() {
        let mut game = game();
        // A 2x2 loop: the head moves into the cell the tail just left
        game.snake_mut().set_body(
            [
                Position::new(5, 5),
                Position::new(5, 6),
                Position::new(6, 6),
                Position::new(6, 5),
            ],
            Some(Direction::Up),
        );
        game.turn(Direction::Right);

        let info = game.step();

        assert_eq!(info.collision_type, None);
        assert_eq!(game.snake().head(), Position::new(6, 5));
        assert!(game.is_running());
    }

    #[test]
    fn test_game_over_keeps_speed_by_default() {
        let mut game = game();
        game.turn(Direction::Right);
        game.food_mut().set_position(Position::new(10, 10));
        game.step();
        game.food_mut().set_position(Position::new(39, 29));
        let faster = game.interval();
        assert!(faster < 0.20);

        game.turn(Direction::Up);
        for _ in 0..11 {
            game.step();
        }

        assert_eq!(game.phase(), Phase::Halted);
        assert_eq!(game.score(), 0);
        assert_eq!(game.state().last_score, 1);
        assert_eq!(game.interval(), faster);
    }

    #[test]
    fn test_game_over_can_reset_speed() {
        let config = GameConfig {
            seed: Some(3),
            reset_speed_on_game_over: true,
            ..Default::default()
        };
        let mut game = Game::new(config).unwrap();
        game.turn(Direction::Right);
        game.food_mut().set_position(Position::new(10, 10));
        game.step();
        game.food_mut().set_position(Position::new(39, 29));
        assert!(game.interval() < 0.20);

        game.turn(Direction::Up);
        for _ in 0..11 {
            game.step();
        }

        assert_eq!(game.phase(), Phase::Halted);
        assert_eq!(game.interval(), 0.20);
    }

    #[test]
    fn test_board_cleared_is_a_win() {
        let config = GameConfig {
            grid_width: 2,
            grid_height: 2,
            start_head: Position::new(1, 1),
            initial_snake_length: 1,
            seed: Some(5),
            ..Default::default()
        };
        let mut game = Game::new(config).unwrap();
        game.snake_mut().set_body(
            [Position::new(1, 0), Position::new(0, 0), Position::new(0, 1)],
            Some(Direction::Right),
        );
        game.snake_mut().grow();
        game.food_mut().set_position(Position::new(1, 1));
        game.turn(Direction::Down);

        let info = game.step();

        assert!(info.ate_food);
        assert_eq!(info.round_end, Some(RoundEnd::BoardCleared));
        assert_eq!(info.cues().collect::<Vec<_>>(), vec![SoundCue::Eat]);
        assert_eq!(game.phase(), Phase::Halted);
        assert_eq!(game.state().last_score, 1);
        assert_eq!(game.snake().len(), 1);
    }
}
