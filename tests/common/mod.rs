#![allow(dead_code)]

use occam_recs::{
    config::PipelineConfig,
    services::{loader, pipeline, Recommender},
};

pub const TITLES_HEADER: &str = "id,title,type,description,release_year,age_certification,runtime,genres,production_countries,seasons,imdb_score,tmdb_score,tmdb_popularity";

pub const CREDITS_CSV: &str = "\
person_id,id,name,character,role
1,tm1,Ripley Vance,Captain,ACTOR
2,tm2,Ripley Vance,,ACTOR
3,tm2,Ada Crane,Engineer,ACTOR
4,tm3,Jules Moreau,,DIRECTOR
5,tm404,Ghost Writer,,ACTOR
";

/// Three titles: two space operas sharing vocabulary and genre, one romance
pub fn space_catalog_csv() -> String {
    format!(
        "{TITLES_HEADER}
tm1,A,MOVIE,space opera with robots,2001,PG-13,120,['Sci-Fi'],['US'],,0.9,7.0,10.0
tm2,B,MOVIE,space opera with aliens,2003,PG-13,120,['Sci-Fi'],['US'],,0.8,7.0,10.0
tm3,C,MOVIE,romantic drama,2005,R,120,['Romance'],['FR'],,0.7,7.0,10.0
"
    )
}

/// A larger catalog with a missing score, a missing description and a
/// repeated display name
pub fn mixed_catalog_csv() -> String {
    format!(
        "{TITLES_HEADER}
tm1,Starfall,MOVIE,a crew of explorers crosses deep space to find a new home,2014,PG-13,169,\"['scifi', 'drama']\",['US'],,8.6,8.4,120.5
tm2,Void Runners,MOVIE,explorers race through deep space chased by pirates,2019,PG-13,110,\"['scifi', 'action']\",['US'],,6.1,6.3,45.2
tm3,Paris Letters,MOVIE,two strangers fall in love through letters in paris,2008,PG,95,\"['romance', 'drama']\",\"['FR', 'US']\",,7.2,7.0,12.0
tm4,Midnight Bakery,MOVIE,a baker falls in love with a night shift nurse,2011,PG,101,\"['romance', 'comedy']\",['GB'],,6.8,6.5,8.1
tm5,Dune,MOVIE,a noble family fights for control of a desert planet,1984,PG-13,137,\"['scifi', 'action']\",['US'],,6.3,6.2,30.0
tm6,Dune,MOVIE,a young heir leads a desert rebellion on a spice planet,2021,PG-13,155,\"['scifi', 'drama']\",\"['US', 'CA']\",,8.0,7.8,250.0
tm7,Lost Reel,MOVIE,,1999,,88,['documentation'],['US'],,5.5,6.0,3.3
tm8,Unrated Oddity,SHOW,a strange show with no critic score,2020,TV-14,30,['comedy'],['GB'],2.0,,5.0,4.0
"
    )
}

pub fn build(titles_csv: &str) -> Recommender {
    let titles = loader::read_titles(titles_csv.as_bytes()).unwrap();
    let credits = loader::read_credits(CREDITS_CSV.as_bytes()).unwrap();
    pipeline::build(titles, credits, PipelineConfig::default()).unwrap()
}
