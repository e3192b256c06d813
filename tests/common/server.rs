use std::time::Duration;

use tiny_http::{Method, Request, Response, Server};

/// Start a HTTP server in a random port to serve `files`.
///
/// Each file is a `(path, contents)` pair. Requests to any other path
/// get a `404` response.
///
/// Returns the port number of the server.
pub fn start_server(files: Vec<(&'static str, Vec<u8>)>) -> u16 {
    let server = Server::http("127.0.0.1:0").expect("start file server");
    let port = server.server_addr().to_ip().unwrap().port();

    let file_server = FileServer { server, files };

    std::thread::spawn(move || file_server.run());

    port
}

struct FileServer {
    server: Server,
    files: Vec<(&'static str, Vec<u8>)>,
}

impl FileServer {
    fn run(self) {
        let timeout = Duration::from_secs(30);

        while let Ok(Some(request)) = self.server.recv_timeout(timeout) {
            self.handle(request);
        }
    }

    fn handle(&self, request: Request) {
        let response = if request.method() != &Method::Get {
            Response::from_string("Method Not Allowed").with_status_code(405)
        } else {
            match self.files.iter().find(|(path, _)| *path == request.url()) {
                Some((_, data)) => Response::from_data(data.clone()),
                None => Response::from_string("Not Found").with_status_code(404),
            }
        };

        request.respond(response).expect("Send response");
    }
}
