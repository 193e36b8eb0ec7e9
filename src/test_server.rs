//! One-shot HTTP responder on a loopback port, used by the API client tests

use std::io::{BufRead, BufReader, Read, Write};
use std::net::{TcpListener, TcpStream};
use std::thread::{self, JoinHandle};

pub(crate) struct TestServer {
    url: String,
    handle: JoinHandle<String>,
}

impl TestServer {
    /// Answer the first connection with `status` and a JSON `body`
    pub(crate) fn respond(status: u16, body: &str) -> Self {
        let listener = TcpListener::bind("127.0.0.1:0").unwrap();
        let url = format!("http://{}", listener.local_addr().unwrap());
        let body = body.to_string();

        let handle = thread::spawn(move || {
            let (mut stream, _) = listener.accept().unwrap();
            let request = read_request(&mut stream);
            let response = format!(
                "HTTP/1.1 {} {}\r\nContent-Type: application/json\r\nContent-Length: {}\r\nConnection: close\r\n\r\n{}",
                status,
                if status < 400 { "OK" } else { "Error" },
                body.len(),
                body
            );
            stream.write_all(response.as_bytes()).unwrap();
            request
        });

        Self { url, handle }
    }

    pub(crate) fn url(&self) -> &str {
        &self.url
    }

    /// The raw request that was served: request line, headers and body
    pub(crate) fn request(self) -> String {
        self.handle.join().unwrap()
    }
}

fn read_request(stream: &mut TcpStream) -> String {
    let mut reader = BufReader::new(stream);
    let mut request = String::new();
    let mut content_length = 0;

    loop {
        let mut line = String::new();
        if reader.read_line(&mut line).unwrap() == 0 {
            break;
        }
        if let Some(value) = line.to_ascii_lowercase().strip_prefix("content-length:") {
            content_length = value.trim().parse().unwrap();
        }
        let end_of_head = line == "\r\n";
        request.push_str(&line);
        if end_of_head {
            break;
        }
    }

    let mut body = vec![0; content_length];
    reader.read_exact(&mut body).unwrap();
    request.push_str(&String::from_utf8_lossy(&body));
    request
}
