pub mod anuncio_controller;
pub mod auth_controller;
pub mod encuesta_controller;
pub mod mensaje_controller;
pub mod pago_controller;
pub mod reservacion_controller;
pub mod visitante_controller;
