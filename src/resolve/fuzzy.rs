use super::item::SearchItem;

/// Score a candidate title against a typed query using subsequence
/// matching. Returns `None` when the query is not a subsequence of the
/// title, otherwise `(score, matched_indices)` where the indices point at
/// the title characters that matched (used for highlighting).
///
/// Matching is case-insensitive. Scoring rewards word starts, contiguous
/// runs and early positions, and penalizes gaps.
pub fn fuzzy_score(query: &str, title: &str) -> Option<(i32, Vec<usize>)> {
    if query.is_empty() {
        return Some((0, vec![]));
    }

    let query_lower: Vec<char> = query.chars().map(lower_char).collect();
    let title_chars: Vec<char> = title.chars().collect();
    let title_lower: Vec<char> = title.chars().map(lower_char).collect();

    let mut matched_indices = Vec::with_capacity(query_lower.len());
    let mut search_from = 0;

    for &qc in &query_lower {
        match title_lower[search_from..].iter().position(|&tc| tc == qc) {
            Some(pos) => {
                let idx = search_from + pos;
                matched_indices.push(idx);
                search_from = idx + 1;
            }
            None => return None,
        }
    }

    let mut score: i32 = 0;
    let half = title_chars.len() / 2;

    for (mi, &idx) in matched_indices.iter().enumerate() {
        // Word boundary bonus: start of string or after a separator
        let is_word_start = idx == 0
            || matches!(
                title_chars.get(idx.wrapping_sub(1)),
                Some(' ' | '-' | '(' | ':')
            );
        if is_word_start {
            score += 10;
        }

        // Consecutive bonus
        if mi > 0 && idx == matched_indices[mi - 1] + 1 {
            score += 5;
        }

        // First-half bonus
        if idx < half {
            score += 3;
        }

        // Gap penalty
        if mi > 0 {
            let gap = idx.saturating_sub(matched_indices[mi - 1] + 1);
            score -= gap as i32;
        }
    }

    Some((score, matched_indices))
}

/// Lowercase one char to one char, keeping match indices aligned with
/// the displayed title ('İ' lowercases to two chars).
fn lower_char(c: char) -> char {
    c.to_lowercase().next().unwrap_or(c)
}

/// Keep the candidates whose title the query fuzzy-matches, ordered by
/// score descending then title ascending. An empty query keeps everything,
/// which with all-zero scores yields a title-ascending list.
pub fn rank_items(query: &str, items: Vec<SearchItem>) -> Vec<SearchItem> {
    let mut scored: Vec<(i32, SearchItem)> = items
        .into_iter()
        .filter_map(|item| fuzzy_score(query, &item.title).map(|(score, _)| (score, item)))
        .collect();
    scored.sort_by(|a, b| b.0.cmp(&a.0).then_with(|| a.1.title.cmp(&b.1.title)));
    scored.into_iter().map(|(_, item)| item).collect()
}
