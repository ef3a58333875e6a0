//! Using the list as an async sink and source.
//!
//! A producer task writes into a `BufferListStream`, the consumer reads it
//! back as a stream of fixed-size chunks. A tokio reader is drained with
//! `fill_from` through the compat layer.
//!
//! Run with:
//!     cargo run --example async_stream --features async-io

use std::sync::mpsc;

use chunklist::{BufferListStream, StreamConfig, fill_from};
use futures_util::{AsyncWriteExt, StreamExt};
use tokio_util::compat::TokioAsyncReadCompatExt;

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    let (tx, rx) = mpsc::channel();

    let config = StreamConfig::default().with_read_size(4096);
    let mut stream = BufferListStream::with_callback(config, move |result| {
        let _ = tx.send(result.map(|all| all.len()));
    });

    for i in 0..10u8 {
        let line = vec![b'a' + i; 1000];
        stream.write_all(&line).await?;
    }
    stream.close().await?;

    println!("callback saw {} bytes", rx.recv()??);

    let mut count = 0;
    while let Some(chunk) = stream.next().await {
        count += 1;
        println!("read chunk {}: {} bytes", count, chunk?.len());
    }

    // Any tokio reader works via the compat adapter
    let file = tokio::io::BufReader::new(&b"read from a tokio reader"[..]).compat();
    let list = fill_from(file, StreamConfig::default()).await?;
    println!(
        "filled {} bytes, 'tokio' at {:?}",
        list.len(),
        list.index_of("tokio", 0)
    );

    Ok(())
}
