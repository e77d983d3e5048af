pub mod act_draw;
pub mod surface;
