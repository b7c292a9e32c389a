//! Sample bookmarks and notes used when a workspace has no saved data

use crate::domain::ids::now_millis;
use crate::domain::{Bookmark, Category, Note};

const DAY_MS: i64 = 86_400_000;

fn tags(list: &[&str]) -> Vec<String> {
    list.iter().map(|t| t.to_string()).collect()
}

pub fn sample_bookmarks() -> Vec<Bookmark> {
    let now = now_millis();
    let entry = |id: &str, title: &str, url: &str, description: &str, category, t: &[&str], age| Bookmark {
        id: id.to_string(),
        title: title.to_string(),
        url: url.to_string(),
        description: description.to_string(),
        category,
        tags: tags(t),
        created_at: now - age,
    };

    vec![
        entry(
            "1",
            "STMicroelectronics",
            "https://www.st.com",
            "STM32 datasheets, reference manuals and HAL downloads.",
            Category::Embedded,
            &["STM32", "HAL", "Datasheet"],
            0,
        ),
        entry(
            "2",
            "Linux Kernel Archives",
            "https://www.kernel.org",
            "Primary distribution site for Linux kernel sources.",
            Category::Linux,
            &["Kernel", "Source", "OS"],
            100_000,
        ),
        entry(
            "3",
            "DigiKey",
            "https://www.digikey.com",
            "Electronic component distributor; parametric search and datasheets.",
            Category::Hardware,
            &["Component", "Distributor", "Datasheet"],
            200_000,
        ),
        entry(
            "4",
            "FreeRTOS",
            "https://www.freertos.org",
            "Market-leading open source real-time kernel for microcontrollers.",
            Category::Embedded,
            &["RTOS", "Scheduler", "Middleware"],
            300_000,
        ),
        entry(
            "5",
            "Altium Designer",
            "https://www.altium.com",
            "PCB design software resources and documentation.",
            Category::Tools,
            &["PCB", "EDA", "Design"],
            400_000,
        ),
    ]
}

pub fn sample_notes() -> Vec<Note> {
    let now = now_millis();
    vec![
        Note {
            id: "n1".to_string(),
            title: "I2C bus lock-up notes".to_string(),
            content: "Symptom: SCL held low after a slave reset mid-transfer.\n\n\
                      Fix:\n\
                      1. Toggle SCL nine times as GPIO during init to release the bus.\n\
                      2. Check the pull-up resistors for cold joints."
                .to_string(),
            tags: tags(&["I2C", "STM32", "Debug"]),
            created_at: now - DAY_MS,
            updated_at: now - DAY_MS,
        },
        Note {
            id: "n2".to_string(),
            title: "Device Tree cheat sheet".to_string(),
            content: "Compile: dtc -I dts -O dtb -o my.dtb my.dts\n\
                      Decompile: dtc -I dtb -O dts -o dump.dts my.dtb\n\n\
                      The compatible property must match the driver's of_match_table."
                .to_string(),
            tags: tags(&["Linux", "DeviceTree", "Driver"]),
            created_at: now - 2 * DAY_MS,
            updated_at: now - 100_000,
        },
    ]
}
