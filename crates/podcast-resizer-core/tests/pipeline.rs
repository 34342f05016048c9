//! End-to-end runs of the resize pipeline against the in-memory store.

use aws_lambda_events::event::s3::S3Event;
use image::{DynamicImage, GenericImageView, ImageFormat, Rgb, RgbImage};
use podcast_resizer_core::{Config, ImageProcessor, MemoryStore, PipelineError, Stage, TriggerEvent};
use std::io::Cursor;

const BUCKET: &str = "B";

fn s3_event(keys: &[&str]) -> S3Event {
    let records: Vec<serde_json::Value> = keys
        .iter()
        .map(|key| {
            serde_json::json!({
                "eventVersion": "2.1",
                "eventSource": "aws:s3",
                "awsRegion": "ap-northeast-1",
                "eventTime": "2021-06-01T12:00:00.000Z",
                "eventName": "ObjectCreated:Put",
                "userIdentity": { "principalId": "AWS:EXAMPLE" },
                "requestParameters": { "sourceIPAddress": "127.0.0.1" },
                "responseElements": {
                    "x-amz-request-id": "C3D13FE58DE4C810",
                    "x-amz-id-2": "FMyUVURIY8/IgAtTv8xRjskZQpcIZ9KG4V5Wp6S7S/JRWeUWerMUE5JgHvANOjpD"
                },
                "s3": {
                    "s3SchemaVersion": "1.0",
                    "configurationId": "resize-on-upload",
                    "bucket": {
                        "name": BUCKET,
                        "ownerIdentity": { "principalId": "EXAMPLE" },
                        "arn": "arn:aws:s3:::B"
                    },
                    "object": {
                        "key": key,
                        "size": 1024,
                        "eTag": "0123456789abcdef0123456789abcdef",
                        "sequencer": "0A1B2C3D4E5F678901"
                    }
                }
            })
        })
        .collect();
    serde_json::from_value(serde_json::json!({ "Records": records })).unwrap()
}

fn encoded(format: ImageFormat, width: u32, height: u32) -> Vec<u8> {
    let img = RgbImage::from_fn(width, height, |x, y| {
        Rgb([(x / 24 % 256) as u8, (y / 16 % 256) as u8, ((x + y) / 40 % 256) as u8])
    });
    let img = match format {
        ImageFormat::Gif => DynamicImage::ImageRgba8(DynamicImage::ImageRgb8(img).to_rgba8()),
        _ => DynamicImage::ImageRgb8(img),
    };
    let mut buf = Cursor::new(Vec::new());
    img.write_to(&mut buf, format).unwrap();
    buf.into_inner()
}

fn processor(store: &MemoryStore) -> ImageProcessor<MemoryStore> {
    ImageProcessor::new(store.clone(), &Config::default())
}

#[tokio::test]
async fn large_jpeg_is_fitted_and_written_under_prefix() {
    let store = MemoryStore::new();
    store.insert(BUCKET, "raw/2021/ep1.jpg", encoded(ImageFormat::Jpeg, 6000, 4000));

    let processed = processor(&store)
        .handle(&s3_event(&["raw/2021/ep1.jpg"]))
        .await
        .unwrap();

    assert_eq!(processed.bucket, BUCKET);
    assert_eq!(processed.output_key, "/podcast/images/ep1.jpg");
    assert_eq!((processed.source_width, processed.source_height), (6000, 4000));
    assert_eq!((processed.width, processed.height), (3000, 2000));

    let written = store.get(BUCKET, "/podcast/images/ep1.jpg").unwrap();
    assert_eq!(written.content_type.as_deref(), Some("image/jpeg"));
    let decoded = image::load_from_memory_with_format(&written.body, ImageFormat::Jpeg).unwrap();
    assert_eq!(decoded.dimensions(), (3000, 2000));

    // The source stays where it was
    assert!(store.get(BUCKET, "raw/2021/ep1.jpg").is_some());
}

#[tokio::test]
async fn small_images_keep_their_dimensions() {
    let store = MemoryStore::new();
    let cases = [
        ("raw/small.jpg", ImageFormat::Jpeg, 800, 600),
        ("raw/small.png", ImageFormat::Png, 3000, 1200),
        ("raw/small.gif", ImageFormat::Gif, 320, 240),
    ];
    for (key, format, w, h) in cases {
        store.insert(BUCKET, key, encoded(format, w, h));
        let processed = processor(&store).handle(&s3_event(&[key])).await.unwrap();
        assert_eq!((processed.width, processed.height), (w, h), "{key}");

        let written = store.get(BUCKET, &processed.output_key).unwrap();
        let decoded = image::load_from_memory(&written.body).unwrap();
        assert_eq!(decoded.dimensions(), (w, h), "{key}");
    }
}

#[tokio::test]
async fn tall_png_scales_on_height() {
    let store = MemoryStore::new();
    store.insert(BUCKET, "uploads/tall.png", encoded(ImageFormat::Png, 1500, 4500));

    let processed = processor(&store)
        .handle(&s3_event(&["uploads/tall.png"]))
        .await
        .unwrap();

    assert_eq!(processed.source_format, "png");
    assert_eq!((processed.width, processed.height), (1000, 3000));
    let written = store.get(BUCKET, "/podcast/images/tall.png").unwrap();
    let decoded = image::load_from_memory(&written.body).unwrap();
    assert_eq!(decoded.dimensions(), (1000, 3000));
}

#[tokio::test]
async fn rerunning_the_same_source_is_byte_identical() {
    let store = MemoryStore::new();
    store.insert(BUCKET, "raw/ep7.png", encoded(ImageFormat::Png, 3600, 2400));
    let processor = processor(&store);
    let event = s3_event(&["raw/ep7.png"]);

    let first = processor.handle(&event).await.unwrap();
    let first_body = store.get(BUCKET, &first.output_key).unwrap().body;
    let second = processor.handle(&event).await.unwrap();
    let second_body = store.get(BUCKET, &second.output_key).unwrap().body;

    assert_eq!(first.output_hash, second.output_hash);
    assert_eq!(first_body, second_body);
    assert_eq!(store.put_count(), 2);
}

#[tokio::test]
async fn only_the_first_record_is_processed() {
    let store = MemoryStore::new();
    store.insert(BUCKET, "raw/a.png", encoded(ImageFormat::Png, 40, 40));
    store.insert(BUCKET, "raw/b.png", encoded(ImageFormat::Png, 40, 40));

    let processed = processor(&store)
        .handle(&s3_event(&["raw/a.png", "raw/b.png"]))
        .await
        .unwrap();

    assert_eq!(processed.ignored_records, 1);
    assert!(store.get(BUCKET, "/podcast/images/a.png").is_some());
    assert!(store.get(BUCKET, "/podcast/images/b.png").is_none());
}

#[tokio::test]
async fn empty_notification_is_malformed() {
    let store = MemoryStore::new();
    let err = processor(&store).handle(&s3_event(&[])).await.unwrap_err();

    assert!(matches!(err, PipelineError::MalformedEvent(_)));
    assert_eq!(err.stage(), Stage::Event);
}

#[tokio::test]
async fn truncated_source_is_decode_error_and_nothing_is_written() {
    let store = MemoryStore::new();
    let mut bytes = encoded(ImageFormat::Png, 200, 200);
    bytes.truncate(bytes.len() / 3);
    store.insert(BUCKET, "raw/cut.png", bytes);

    let err = processor(&store)
        .handle(&s3_event(&["raw/cut.png"]))
        .await
        .unwrap_err();

    assert_eq!(err.stage(), Stage::Decode);
    assert_eq!(store.put_count(), 0);
    assert!(store.get(BUCKET, "/podcast/images/cut.png").is_none());
}

#[tokio::test]
async fn url_encoded_keys_are_fetched_decoded() {
    let store = MemoryStore::new();
    store.insert(BUCKET, "raw/Season 2/ep 1.png", encoded(ImageFormat::Png, 30, 20));

    let processed = processor(&store)
        .handle(&s3_event(&["raw/Season+2/ep+1.png"]))
        .await
        .unwrap();

    assert_eq!(processed.source_key, "raw/Season 2/ep 1.png");
    assert_eq!(processed.output_key, "/podcast/images/ep 1.png");
}

fn crc32(data: &[u8]) -> u32 {
    let mut crc = 0xFFFF_FFFFu32;
    for &byte in data {
        crc ^= byte as u32;
        for _ in 0..8 {
            crc = if crc & 1 != 0 {
                (crc >> 1) ^ 0xEDB8_8320
            } else {
                crc >> 1
            };
        }
    }
    !crc
}

#[tokio::test]
async fn headers_declaring_huge_dimensions_are_decode_errors() {
    let store = MemoryStore::new();

    // 1×1 PNG re-labelled as 100000×100000, IHDR CRC kept valid
    let mut png = encoded(ImageFormat::Png, 1, 1);
    png[16..20].copy_from_slice(&100_000u32.to_be_bytes());
    png[20..24].copy_from_slice(&100_000u32.to_be_bytes());
    let crc = crc32(&png[12..29]);
    png[29..33].copy_from_slice(&crc.to_be_bytes());
    store.insert(BUCKET, "raw/bomb.png", png);

    // 1×1 GIF whose logical screen claims 60000×60000
    let mut gif = encoded(ImageFormat::Gif, 1, 1);
    gif[6..8].copy_from_slice(&60_000u16.to_le_bytes());
    gif[8..10].copy_from_slice(&60_000u16.to_le_bytes());
    store.insert(BUCKET, "raw/bomb.gif", gif);

    let processor = processor(&store);
    for key in ["raw/bomb.png", "raw/bomb.gif"] {
        let trigger = TriggerEvent::new(BUCKET, key);
        let err = processor.process(&trigger).await.unwrap_err();
        assert!(matches!(err, PipelineError::Decode { .. }), "{key}: {err:?}");
        assert_eq!(err.stage(), Stage::Decode, "{key}");
    }
    assert_eq!(store.put_count(), 0);
}
