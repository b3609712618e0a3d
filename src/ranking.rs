use crate::models::Movie;

/// Ranks a listing sorted by ascending rating: the first entry gets
/// `movies.len()`, the last (best rated) gets 1.
pub fn assign(movies: &mut [Movie]) {
    let count = movies.len();
    for (index, movie) in movies.iter_mut().enumerate() {
        movie.ranking = Some((count - index) as i32);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn movie(id: i32, rating: Option<f64>) -> Movie {
        Movie {
            id,
            title: format!("Movie {id}"),
            year: 2000,
            description: String::new(),
            rating,
            ranking: None,
            review: None,
            img_url: String::new(),
        }
    }

    #[test]
    fn empty_listing_is_a_no_op() {
        let mut movies: Vec<Movie> = Vec::new();
        assign(&mut movies);
        assert!(movies.is_empty());
    }

    #[test]
    fn single_movie_ranks_first() {
        let mut movies = vec![movie(1, Some(4.0))];
        assign(&mut movies);
        assert_eq!(movies[0].ranking, Some(1));
    }

    #[test]
    fn ascending_listing_gets_reverse_rank() {
        let mut movies = vec![movie(3, Some(3.0)), movie(1, Some(5.0)), movie(2, Some(8.0))];
        assign(&mut movies);

        let ranks: Vec<(i32, Option<i32>)> = movies.iter().map(|m| (m.id, m.ranking)).collect();
        assert_eq!(ranks, vec![(3, Some(3)), (1, Some(2)), (2, Some(1))]);
    }

    #[test]
    fn stale_rankings_are_overwritten() {
        let mut a = movie(1, None);
        a.ranking = Some(10);
        let mut movies = vec![a, movie(2, Some(9.5))];
        assign(&mut movies);
        assert_eq!(movies[0].ranking, Some(2));
        assert_eq!(movies[1].ranking, Some(1));
    }

    #[test]
    fn rankings_cover_one_to_count() {
        let mut movies: Vec<Movie> = (1..=7).map(|i| movie(i, Some(i as f64))).collect();
        assign(&mut movies);

        let mut ranks: Vec<i32> = movies.iter().filter_map(|m| m.ranking).collect();
        ranks.sort_unstable();
        assert_eq!(ranks, (1..=7).collect::<Vec<_>>());
    }
}
