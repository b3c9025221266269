use crate::core::rng::Rng;
use crate::stars::shooting::ShootingStar;

/// Wall-clock spawn gate: at most one activation per interval.
#[derive(Debug, Clone)]
pub struct SpawnTimer {
    interval_ms: f64,
    last_spawn_ms: f64,
}

impl SpawnTimer {
    /// `spawn_rate` is attempts per second; zero disables spawning.
    pub fn new(spawn_rate: f32) -> Self {
        Self {
            interval_ms: 1000.0 / spawn_rate as f64,
            last_spawn_ms: 0.0,
        }
    }

    /// Start counting from the current time (call when the loop starts).
    pub fn arm(&mut self, now_ms: f64) {
        self.last_spawn_ms = now_ms;
    }

    pub fn ready(&self, now_ms: f64) -> bool {
        now_ms - self.last_spawn_ms > self.interval_ms
    }

    pub fn mark_spawned(&mut self, now_ms: f64) {
        self.last_spawn_ms = now_ms;
    }
}

/// Fixed-capacity pool of shooting stars, recycled in place.
///
/// Nothing is allocated per frame: a despawned star stays in the pool with
/// its `active` flag down until the scheduler picks it up again.
pub struct ShootingStarPool {
    stars: Vec<ShootingStar>,
    timer: SpawnTimer,
}

impl ShootingStarPool {
    pub fn new(count: usize, spawn_rate: f32) -> Self {
        Self {
            stars: (0..count).map(|_| ShootingStar::new()).collect(),
            timer: SpawnTimer::new(spawn_rate),
        }
    }

    /// Arm the spawn timer when the animation loop starts.
    pub fn arm(&mut self, now_ms: f64) {
        self.timer.arm(now_ms);
    }

    /// Once the interval has elapsed, activate the first dormant star. A
    /// fully active pool drops the attempt silently; the timer is left
    /// untouched so the next frame retries.
    pub fn try_spawn(&mut self, now_ms: f64, width: f32, height: f32, rng: &mut Rng) {
        if !self.timer.ready(now_ms) {
            return;
        }
        if let Some(star) = self.stars.iter_mut().find(|s| !s.active) {
            star.spawn(width, height, rng);
            self.timer.mark_spawned(now_ms);
        }
    }

    pub fn iter(&self) -> impl Iterator<Item = &ShootingStar> {
        self.stars.iter()
    }

    pub fn iter_mut(&mut self) -> impl Iterator<Item = &mut ShootingStar> {
        self.stars.iter_mut()
    }

    pub fn len(&self) -> usize {
        self.stars.len()
    }

    pub fn is_empty(&self) -> bool {
        self.stars.is_empty()
    }

    pub fn active_count(&self) -> usize {
        self.stars.iter().filter(|s| s.active).count()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const W: f32 = 1080.0;
    const H: f32 = 1920.0;

    #[test]
    fn pool_starts_fully_dormant() {
        let pool = ShootingStarPool::new(10, 1.5);
        assert_eq!(pool.len(), 10);
        assert_eq!(pool.active_count(), 0);
    }

    #[test]
    fn no_spawn_before_the_interval() {
        let mut rng = Rng::new(31);
        let mut pool = ShootingStarPool::new(10, 1.5);
        pool.arm(1000.0);
        pool.try_spawn(1200.0, W, H, &mut rng); // 200ms < 666.7ms interval
        assert_eq!(pool.active_count(), 0);
    }

    #[test]
    fn one_spawn_per_elapsed_interval() {
        let mut rng = Rng::new(33);
        let mut pool = ShootingStarPool::new(10, 1.5);
        pool.arm(0.0);

        pool.try_spawn(700.0, W, H, &mut rng);
        assert_eq!(pool.active_count(), 1);

        // Timer reset on spawn: an immediate retry does nothing.
        pool.try_spawn(710.0, W, H, &mut rng);
        assert_eq!(pool.active_count(), 1);

        pool.try_spawn(1400.0, W, H, &mut rng);
        assert_eq!(pool.active_count(), 2);
    }

    #[test]
    fn exhausted_pool_drops_the_attempt_and_keeps_the_timer_hot() {
        let mut rng = Rng::new(35);
        let mut pool = ShootingStarPool::new(2, 1.5);
        pool.arm(0.0);
        pool.try_spawn(700.0, W, H, &mut rng);
        pool.try_spawn(1400.0, W, H, &mut rng);
        assert_eq!(pool.active_count(), 2);

        // Pool exhausted: silently skipped, timer untouched.
        pool.try_spawn(2100.0, W, H, &mut rng);
        assert_eq!(pool.active_count(), 2);

        // Free one star; the still-hot timer spawns on the very next frame.
        for star in pool.iter_mut() {
            star.active = false;
            break;
        }
        pool.try_spawn(2116.0, W, H, &mut rng);
        assert_eq!(pool.active_count(), 2);
    }

    #[test]
    fn zero_rate_never_spawns() {
        let mut rng = Rng::new(37);
        let mut pool = ShootingStarPool::new(4, 0.0);
        pool.arm(0.0);
        pool.try_spawn(1e9, W, H, &mut rng);
        assert_eq!(pool.active_count(), 0);
    }
}
