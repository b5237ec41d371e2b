//! Built-in demo catalog used by the landing, browse and dashboard screens

use chrono::{DateTime, Utc};
use movieflix_models::{Genre, Movie, UserProfile};

#[allow(clippy::too_many_arguments)]
fn movie(
    id: u64,
    title: &str,
    overview: &str,
    release_date: &str,
    vote_average: f64,
    vote_count: u32,
    popularity: f64,
    genre_ids: &[u32],
    poster: &str,
    backdrop: &str,
) -> Movie {
    Movie {
        id,
        title: title.to_string(),
        overview: overview.to_string(),
        poster_path: Some(poster.to_string()),
        backdrop_path: Some(backdrop.to_string()),
        release_date: Some(release_date.to_string()),
        vote_average,
        vote_count,
        popularity,
        genre_ids: genre_ids.to_vec(),
    }
}

pub fn demo_movies() -> Vec<Movie> {
    vec![
        movie(
            27205,
            "Inception",
            "Cobb, a skilled thief who steals secrets from deep within the subconscious during the dream state, is offered a chance to have his criminal history erased.",
            "2010-07-15",
            8.4,
            34_000,
            98.5,
            &[28, 878, 12],
            "/oYuLEt3zVCKq57qu2F8dT7NIa6f.jpg",
            "/8ZTVqvKDQ8emSGUEMjsS4yHAwrp.jpg",
        ),
        movie(
            603,
            "The Matrix",
            "Set in the 22nd century, The Matrix tells the story of a computer hacker who joins a group of underground insurgents fighting the vast machines that have taken over the earth.",
            "1999-03-30",
            8.2,
            24_000,
            84.2,
            &[28, 878],
            "/f89U3ADr1oiB1s9GkdPOEpXUk5H.jpg",
            "/fNG7i7RqMErkcqhohV2a6cV1Ehy.jpg",
        ),
        movie(
            157336,
            "Interstellar",
            "The adventures of a group of explorers who make use of a newly discovered wormhole to surpass the limitations on human space travel.",
            "2014-11-05",
            8.4,
            32_000,
            112.0,
            &[12, 18, 878],
            "/gEU2QniE6E77NI6lCU6MxlNBvIx.jpg",
            "/xJHokMbljvjADYdit5fK5VQsXEG.jpg",
        ),
        movie(
            155,
            "The Dark Knight",
            "Batman raises the stakes in his war on crime and faces a criminal mastermind known to the terrified citizens of Gotham as the Joker.",
            "2008-07-16",
            8.5,
            31_000,
            105.3,
            &[18, 28, 80, 53],
            "/qJ2tW6WMUDux911r6m7haRef0WH.jpg",
            "/nMKdUUepR0i5zn0y1T4CsSB5chy.jpg",
        ),
        movie(
            550,
            "Fight Club",
            "A ticking-time-bomb insomniac and a slippery soap salesman channel primal male aggression into a shocking new form of therapy.",
            "1999-10-15",
            8.4,
            27_000,
            73.4,
            &[18],
            "/pB8BM7pdSp6B6Ih7QZ4DrQ3PmJK.jpg",
            "/hZkgoQYus5vegHoetLkCJzb17zJ.jpg",
        ),
        movie(
            680,
            "Pulp Fiction",
            "A burger-loving hit man, his philosophical partner and a washed-up boxer converge in this sprawling crime caper.",
            "1994-09-10",
            8.5,
            26_000,
            69.8,
            &[53, 80],
            "/d5iIlFn5s0ImszYzBPb8JPIfbXD.jpg",
            "/suaEOtk1N1sgg2MTM7oZd2cfVp3.jpg",
        ),
        movie(
            13,
            "Forrest Gump",
            "A man with a low IQ accomplishes great things in his life and is present during significant historic events.",
            "1994-06-23",
            8.5,
            26_500,
            61.2,
            &[35, 18, 10749],
            "/arw2vcBveWOVZr6pxd9XTd1TdQa.jpg",
            "/qdIMHd4sEfJSckfVJfKQvisL02a.jpg",
        ),
        movie(
            278,
            "The Shawshank Redemption",
            "Imprisoned in the 1940s for the double murder of his wife and her lover, upstanding banker Andy Dufresne begins a new life at the Shawshank prison.",
            "1994-09-23",
            8.7,
            26_000,
            88.1,
            &[18, 80],
            "/9cqNxx0GxF0bflZmeSMuL5tnGzr.jpg",
            "/kXfqcdQKsToO0OUXHcrrNCHDBzO.jpg",
        ),
        movie(
            129,
            "Spirited Away",
            "A young girl wanders into a world ruled by gods, witches and spirits, where humans are changed into beasts.",
            "2001-07-20",
            8.5,
            16_000,
            58.9,
            &[16, 10751, 14],
            "/39wmItIWsg5sZMyRUHLkWBcuVCM.jpg",
            "/Ab8mkHmkYADjU7wQiOkia9BzGvS.jpg",
        ),
        movie(
            194,
            "Amélie",
            "At a tiny Parisian café, the adorable yet painfully shy Amélie accidentally discovers a gift for helping others.",
            "2001-04-25",
            7.9,
            11_000,
            32.6,
            &[35, 10749],
            "/nSxDa3M9aMvGVLoItzWTepQ5h5d.jpg",
            "/8dRUNGtAp1d3T5n9E3vKoIFGSDk.jpg",
        ),
        movie(
            11324,
            "Shutter Island",
            "World War II soldier-turned-U.S. Marshal Teddy Daniels investigates the disappearance of a patient from a hospital for the criminally insane.",
            "2010-02-14",
            8.2,
            23_000,
            54.7,
            &[18, 53, 9648],
            "/nrmXQ0zcZUL8jFLrakWc90IR8z9.jpg",
            "/tjwd2ZMoUhe7Xn3wUJCPmSLQPSX.jpg",
        ),
        movie(
            496243,
            "Parasite",
            "All unemployed, Ki-taek's family takes peculiar interest in the wealthy and glamorous Parks for their livelihood until they get entangled in an unexpected incident.",
            "2019-05-30",
            8.5,
            18_000,
            77.3,
            &[35, 53, 18],
            "/7IiTTgloJzvGI1TAYymCfbfl3vT.jpg",
            "/TU9NIjwzjoKPwQHoHshkFcQUCG.jpg",
        ),
    ]
}

pub fn demo_genres() -> Vec<Genre> {
    [
        (28, "Action"),
        (12, "Adventure"),
        (16, "Animation"),
        (35, "Comedy"),
        (80, "Crime"),
        (18, "Drama"),
        (10751, "Family"),
        (14, "Fantasy"),
        (9648, "Mystery"),
        (10749, "Romance"),
        (878, "Science Fiction"),
        (53, "Thriller"),
    ]
    .into_iter()
    .map(|(id, name)| Genre {
        id,
        name: name.to_string(),
    })
    .collect()
}

fn timestamp(rfc3339: &str) -> Option<DateTime<Utc>> {
    DateTime::parse_from_rfc3339(rfc3339)
        .ok()
        .map(|dt| dt.with_timezone(&Utc))
}

/// Profiles offered on the "Who's watching?" screen when the backend has none
pub fn demo_profiles() -> Vec<UserProfile> {
    [
        (1, "Alex", 142, "2024-05-20T19:30:00Z", &["Sci-Fi", "Action", "Thriller"][..]),
        (2, "Sam", 87, "2024-05-18T21:10:00Z", &["Drama", "Romance"][..]),
        (3, "Jordan", 203, "2024-05-21T08:45:00Z", &["Comedy", "Animation", "Family"][..]),
        (4, "Riley", 56, "2024-05-12T17:00:00Z", &["Crime", "Mystery", "Thriller", "Drama"][..]),
    ]
    .into_iter()
    .map(|(id, name, watched_count, last_active, genres)| UserProfile {
        id,
        name: name.to_string(),
        watched_count,
        last_active: timestamp(last_active),
        favorite_genres: genres.iter().map(|g| g.to_string()).collect(),
    })
    .collect()
}

pub fn find_profile(profiles: &[UserProfile], user_id: u64) -> Option<&UserProfile> {
    profiles.iter().find(|p| p.id == user_id)
}
