use cloudfront_codec::{CloudfrontCodec, CloudfrontError, CodecConfig, RecordIterator};
use std::env;
use std::fs::File;
use std::io::{self, Read};

fn main() {
    env_logger::init();

    let args: Vec<String> = env::args().collect();
    let program = args.first().map(String::as_str).unwrap_or("cloudfront-decode");

    let mut log_path: Option<&str> = None;
    let mut config = CodecConfig::default();
    let mut rest = args.iter().skip(1);
    while let Some(arg) = rest.next() {
        if arg == "--charset" {
            // Parse --charset argument
            match rest.next() {
                Some(label) => config = CodecConfig::with_charset(label.as_str()),
                None => {
                    eprintln!("ERROR: --charset flag requires an argument.");
                    std::process::exit(1);
                }
            }
        } else if log_path.is_none() {
            log_path = Some(arg.as_str());
        }
    }

    let Some(log_path) = log_path else {
        eprintln!("Usage: {} <path-to-log-file | -> [--charset <LABEL>]", program);
        std::process::exit(1);
    };

    let codec = match CloudfrontCodec::new(&config) {
        Ok(codec) => codec,
        Err(e) => {
            eprintln!("ERROR: {}", e);
            std::process::exit(1);
        }
    };

    if log_path == "-" {
        match codec.records_stream(io::stdin().lock(), "<stdin>") {
            Ok(records) => print_records(records, "<stdin>"),
            Err(e) => fail(e),
        }
        return;
    }

    let file = match File::open(log_path) {
        Ok(file) => file,
        Err(e) => {
            eprintln!("ERROR: Cannot open {}: {}", log_path, e);
            std::process::exit(1);
        }
    };

    match codec.records(file, log_path) {
        Ok(records) => print_records(records, log_path),
        Err(e) => fail(e),
    }
}

fn print_records<R: Read>(records: RecordIterator<R>, label: &str) {
    let metadata = records.metadata();
    println!("Reading CloudFront log: {}", label);
    println!("  Compressed: {}", records.is_compressed());
    println!("  Version: {}", metadata.version.as_deref().unwrap_or("-"));
    println!("  Fields: {}", metadata.fields.as_deref().unwrap_or("-"));
    println!("{}", "=".repeat(60));

    let mut count = 0u64;
    for result in records {
        match result {
            Ok(record) => {
                println!("{}", record.message);
                count += 1;
            }
            Err(e) => fail(e),
        }
    }

    println!("{}", "=".repeat(60));
    println!("{} records decoded", count);
}

fn fail(e: CloudfrontError) -> ! {
    eprintln!("\nERROR: Failed to decode CloudFront log");
    eprintln!("  {}", e);
    std::process::exit(1);
}
