//! テストデータ生成ツール
//!
//! `tests/data/sample_rooms.csv` を再生成する。引数で件数を指定すると
//! ランダムな大規模データ `tests/data/random_rooms.csv` も生成する。
//!
//! 使用方法: cargo run --bin generate_test_data [ROWS]

use rand::seq::SliceRandom;
use rand::Rng;
use std::fs;

const HEADER: [&str; 8] = [
    "room_id",
    "url",
    "content",
    "create_time",
    "user_id",
    "uid",
    "risk_label_name",
    "device",
];

// 統合テストが期待する固定データ
const SAMPLE_ROWS: [[&str; 8]; 13] = [
    ["room-a", "https://cdn.example.com/snap/a1.jpg", "", "2024-03-01T10:00:00Z", "u-alice", "", "", "ios"],
    ["room-a", "https://cdn.example.com/voice/a1.mp3?sig=abc", "", "2024-03-01T10:02:00Z", "u-alice", "", "", "ios"],
    ["room-a", "", "hello there", "2024-03-01T10:02:00Z", "u-alice", "", "spam", "ios"],
    ["room-a", "https://cdn.example.com/voice/a1.mp3?sig=def", "", "2024-03-01T10:05:00Z", "", "", "NULL", "ios"],
    ["room-a", "", "NULL", "2024-03-01T10:06:00Z", "u-bob", "", "", "android"],
    ["room-a", "", "hi alice", "2024-03-01T10:07:00Z", "", "u-bob", "abuse", "android"],
    ["room-a", "https://cdn.example.com/snap/a2.JPEG?w=200", "", "", "u-bob", "", "", "android"],
    ["room-b", "", "first", "2024-03-02 08:00:00", "u-carol", "", "", "web"],
    ["room-b", "https://cdn.example.com/voice/b1.mp3", "", "2024-03-02 08:00:00", "u-carol", "", "", "web"],
    ["room-b", "", "bye", "2024-03-02 08:20:30", "u-alice", "", "spam", "web"],
    ["room-a", "", "back again", "2024-03-01T10:30:00Z", "u-alice", "", "", "ios"],
    ["room-c", "https://cdn.example.com/clip/c1.mp4", "", "not-a-date", "u-dave", "", "", "web"],
    ["  ", "", "orphan", "2024-03-03T00:00:00Z", "u-erin", "", "", "web"],
];

const RISK_LABELS: [&str; 4] = ["spam", "abuse", "NULL", ""];
const MESSAGES: [&str; 5] = ["hello", "hi", "NULL", "bye", "anyone here?"];

fn write_sample() -> anyhow::Result<()> {
    let mut writer = csv::Writer::from_path("tests/data/sample_rooms.csv")?;
    writer.write_record(HEADER)?;
    for row in SAMPLE_ROWS {
        writer.write_record(row)?;
    }
    writer.flush()?;
    println!("✅ テストデータファイルを生成しました: tests/data/sample_rooms.csv");
    Ok(())
}

fn write_random(rows: usize) -> anyhow::Result<()> {
    let mut rng = rand::thread_rng();
    let rooms = (rows / 20).max(1);
    let users = (rows / 10).max(1);
    let base = chrono::DateTime::parse_from_rfc3339("2024-03-01T00:00:00Z")?;

    let mut writer = csv::Writer::from_path("tests/data/random_rooms.csv")?;
    writer.write_record(HEADER)?;
    for _ in 0..rows {
        let room_id = format!("room-{}", rng.gen_range(0..rooms));
        let user_id = format!("u-{}", rng.gen_range(0..users));
        let offset = chrono::Duration::seconds(rng.gen_range(0..86_400));
        let create_time = (base + offset).to_rfc3339();

        let (url, content) = match rng.gen_range(0..3) {
            0 => (format!("https://cdn.example.com/snap/{}.jpg", rng.gen::<u32>()), String::new()),
            1 => (
                format!("https://cdn.example.com/voice/{}.mp3?sig={}", rng.gen::<u16>(), rng.gen::<u32>()),
                String::new(),
            ),
            _ => (String::new(), MESSAGES.choose(&mut rng).copied().unwrap_or_default().to_string()),
        };
        let risk = RISK_LABELS.choose(&mut rng).copied().unwrap_or_default();

        writer.write_record([
            room_id.as_str(),
            url.as_str(),
            content.as_str(),
            create_time.as_str(),
            user_id.as_str(),
            "",
            risk,
            "web",
        ])?;
    }
    writer.flush()?;
    println!("✅ ランダムデータを生成しました: tests/data/random_rooms.csv ({} 行)", rows);
    Ok(())
}

fn main() -> anyhow::Result<()> {
    // tests/data/ディレクトリを作成
    fs::create_dir_all("tests/data")?;

    write_sample()?;

    if let Some(rows) = std::env::args().nth(1) {
        write_random(rows.parse()?)?;
    }
    Ok(())
}
