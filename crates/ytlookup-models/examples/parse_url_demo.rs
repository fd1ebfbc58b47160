//! Demo: YouTube URL classification
//!
//! Run with: cargo run -p ytlookup-models --example parse_url_demo

use ytlookup_models::parse_youtube_url;

fn main() {
    let inputs = [
        "https://www.youtube.com/watch?v=dQw4w9WgXcQ",
        "https://youtu.be/dQw4w9WgXcQ?t=30",
        "https://www.youtube.com/shorts/abc123def45",
        "https://www.youtube.com/watch?v=dQw4w9WgXcQ&list=RDdQw4w9WgXcQ",
        "https://www.youtube.com/playlist?list=PLrAXtmRdnEQy",
        "dQw4w9WgXcQ",
        "https://www.youtube.com/",
        "   ",
        "not a url",
    ];

    for input in inputs {
        println!("\n{}", "=".repeat(60));
        println!("INPUT: {:?}", input);
        println!("{}", "=".repeat(60));

        let parsed = parse_youtube_url(input);
        match serde_json::to_string_pretty(&parsed) {
            Ok(json) => println!("{}", json),
            Err(e) => eprintln!("serialization failed: {}", e),
        }
    }
}
