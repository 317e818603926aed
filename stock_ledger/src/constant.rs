pub const OK_RESPONSE: &str = "HTTP/1.1 200 OK\r\nContent-Type: application/json\r\n\r\n";
pub const OK_PLAIN: &str = "HTTP/1.1 200 OK\r\nContent-Type: text/plain\r\n\r\n";
pub const CREATED: &str = "HTTP/1.1 201 Created\r\nContent-Type: application/json\r\n\r\n";
pub const BAD_REQUEST: &str = "HTTP/1.1 400 Bad Request\r\nContent-Type: application/json\r\n\r\n";
pub const NOT_FOUND: &str = "HTTP/1.1 404 Not Found\r\nContent-Type: application/json\r\n\r\n";
pub const INTERNAL_ERROR: &str = "HTTP/1.1 500 Internal Error\r\nContent-Type: application/json\r\n\r\n";

pub const LOGGING_INCOMING_REQUEST: &str = "Incoming Request handling by: ";
