use wasm_bindgen::prelude::*;
use vlab_engine::*;

// Main lab controller
mod game;

use game::VirtualLab;

vlab_web::export_lab!(VirtualLab, "virtual-lab");
