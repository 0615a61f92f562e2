//! Static seed catalogue
//!
//! One series with its episodes, seed comments and the coin packages shown
//! on the paywall. Everything here is fixture data built once at startup.

use crate::models::{CoinPackage, Comment, Episode, Series};

/// Coins deducted to unlock one premium episode
pub const UNLOCK_COST: u32 = 50;

/// Coins granted by the simulated purchase
pub const PURCHASE_AMOUNT: u32 = 100;

/// Balance at session start unless configured otherwise
pub const STARTING_COINS: u32 = 150;

/// Episodes `1..=FREE_EPISODES` start unlocked
pub const FREE_EPISODES: u32 = 3;

/// Episodes in the seed catalogue
pub const EPISODE_COUNT: u32 = 20;

/// Author name stamped on locally written comments
pub const LOCAL_AUTHOR: &str = "Você";

/// Avatar locator for locally written comments
pub const LOCAL_AVATAR: &str = "https://picsum.photos/seed/me/50/50";

/// Relative timestamp label for a comment written just now
pub const NOW_LABEL: &str = "Agora";

/// Shared sample vertical video
pub const SAMPLE_VIDEO_URL: &str =
    "https://assets.mixkit.co/videos/preview/mixkit-girl-in-neon-sign-1232-large.mp4";

/// Packages offered when the balance cannot cover an unlock
pub const COIN_PACKAGES: &[CoinPackage] = &[
    CoinPackage {
        amount: 100,
        price: "R$ 4,90",
        bonus: 0,
    },
    CoinPackage {
        amount: 500,
        price: "R$ 19,90",
        bonus: 50,
    },
    CoinPackage {
        amount: 1500,
        price: "R$ 49,90",
        bonus: 200,
    },
];

/// Build the seed series snapshot
pub fn seed_series() -> Series {
    Series {
        id: "we-are-your-parents".to_string(),
        title: "Nós Somos Seus Pais".to_string(),
        description: "Após anos separados, uma revelação chocante traz à tona segredos de uma \
                      família bilionária. A jovem herdeira, criada na pobreza, descobre que seus \
                      pais biológicos controlam metade da cidade."
            .to_string(),
        tags: ["Drama", "Romance", "Vingança", "Bilionário"]
            .iter()
            .map(|s| s.to_string())
            .collect(),
        cast: ["Sofia Martins", "Lucas Silva", "Helena Rocha"]
            .iter()
            .map(|s| s.to_string())
            .collect(),
        total_episodes: 65,
        rating: 4.8,
        episodes: (1..=EPISODE_COUNT).map(seed_episode).collect(),
        comments: seed_comments(),
    }
}

fn seed_episode(id: u32) -> Episode {
    Episode {
        id,
        title: format!("Episódio {}", id),
        thumbnail: format!("https://picsum.photos/seed/{}/300/500", id + 99),
        video_url: SAMPLE_VIDEO_URL.to_string(),
        locked: id > FREE_EPISODES,
        views: view_label(id),
        duration: "1:30".to_string(),
    }
}

/// Deterministic pseudo view count in the 0.0k..99.9k range
fn view_label(id: u32) -> String {
    let tenths = (id.wrapping_mul(7919).wrapping_add(104_729)) % 1000;
    format!("{:.1}k", tenths as f32 / 10.0)
}

fn seed_comments() -> Vec<Comment> {
    vec![
        Comment {
            id: 1,
            user: "Maria C.".to_string(),
            avatar: "https://picsum.photos/seed/user1/50/50".to_string(),
            text: "Eu não acredito que ela perdoou ele tão rápido! 😱".to_string(),
            likes: 142,
            timestamp: "2h atrás".to_string(),
        },
        Comment {
            id: 2,
            user: "João P.".to_string(),
            avatar: "https://picsum.photos/seed/user2/50/50".to_string(),
            text: "A produção dessa série tá incrível. O plot twist do ep 5 foi tudo.".to_string(),
            likes: 89,
            timestamp: "5h atrás".to_string(),
        },
        Comment {
            id: 3,
            user: "Ana Souza".to_string(),
            avatar: "https://picsum.photos/seed/user3/50/50".to_string(),
            text: "Alguém tem cupom pra desbloquear mais episódios??".to_string(),
            likes: 256,
            timestamp: "1d atrás".to_string(),
        },
    ]
}

/// Build a locally authored comment
pub fn local_comment(id: u64, text: impl Into<String>) -> Comment {
    Comment {
        id,
        user: LOCAL_AUTHOR.to_string(),
        avatar: LOCAL_AVATAR.to_string(),
        text: text.into(),
        likes: 0,
        timestamp: NOW_LABEL.to_string(),
    }
}
