pub mod clock;
pub mod ecs;
pub mod geometry;
pub mod movement;
pub mod pricing;
pub mod runner;
pub mod scenario;
pub mod systems;
pub mod telemetry;
pub mod zones;
