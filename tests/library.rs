use std::fs;

use imt_hash::{sink, Fetcher};

mod common;

use common::server::start_server;

#[test]
fn fetch_and_save() {
    let target = tempfile::tempdir().unwrap();
    let destination = target.path().join("digest");

    let port = start_server(vec![("/a", b"A".to_vec()), ("/empty", Vec::new())]);

    for (path, expected) in [("a", "824bbe00cdc3552d"), ("empty", "0000000000000000")] {
        let digest = Fetcher::new(format!("http://127.0.0.1:{port}/{path}"))
            .digest()
            .expect("fetch file");

        sink::save(&destination, &digest).expect("save digest");

        assert_eq!(fs::read_to_string(&destination).unwrap(), expected);
    }
}
