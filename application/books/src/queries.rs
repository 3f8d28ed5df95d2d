use std::time::Duration;

use book_domain::{Book, BookDao, BookError, RedactedBook};
use database_traits::dao::GenericDao;
use derived_cache::{DerivedCache, EntityId, Mode};
use mongo_connection::MongoConnect;
use tracing::{debug, instrument, warn};

use crate::cache_keys::{
    BookRef, book_batch_key, book_collection_tag, book_key, book_list_key,
};

/// Single entities stay cached for 5 minutes; list and batch values
/// churn more and get 2.
pub(crate) const ENTITY_TTL: Duration = Duration::from_secs(300);
pub(crate) const LIST_TTL: Duration = Duration::from_secs(120);

#[derive(Clone)]
pub struct GetBookQueryHandler {
    book_dao: BookDao,
    cache: DerivedCache,
}

impl GetBookQueryHandler {
    pub fn new(db: MongoConnect, cache: DerivedCache) -> Self {
        Self {
            book_dao: BookDao::new(db),
            cache,
        }
    }

    #[instrument(skip(self))]
    pub async fn full(
        &self, author: &str, name: &str,
    ) -> Result<Book, BookError> {
        let key = book_key(author, name, Mode::Full);
        match self.cache.get::<Book>(&key).await {
            Ok(Some(book)) => {
                debug!("Cache hit for book {author}/{name}");
                return Ok(book);
            }
            Ok(None) => {}
            Err(err) => {
                warn!(error = %err, "cache read failed, going to store")
            }
        }

        debug!("Cache miss for book {author}/{name}, fetching from store");
        self.load(author, name).await
    }

    #[instrument(skip(self))]
    pub async fn redacted(
        &self, author: &str, name: &str,
    ) -> Result<RedactedBook, BookError> {
        let key = book_key(author, name, Mode::Redacted);
        match self.cache.get::<RedactedBook>(&key).await {
            Ok(Some(book)) => {
                debug!("Cache hit for book {author}/{name}");
                return Ok(book);
            }
            Ok(None) => {}
            Err(err) => {
                warn!(error = %err, "cache read failed, going to store")
            }
        }

        debug!("Cache miss for book {author}/{name}, fetching from store");
        Ok(self.load(author, name).await?.redacted())
    }

    /// Miss path: a missing entity surfaces as NotFound and is never
    /// cached; a found one warms both projections in one step so a
    /// lookup at either privilege level serves the other.
    async fn load(
        &self, author: &str, name: &str,
    ) -> Result<Book, BookError> {
        let book = self
            .book_dao
            .find_by_author_name(author, name)
            .await?
            .ok_or_else(|| {
                BookError::NotFound {
                    author: author.to_string(),
                    name: name.to_string(),
                }
            })?;

        self.warm(author, name, &book).await;
        Ok(book)
    }

    pub(crate) async fn warm(&self, author: &str, name: &str, book: &Book) {
        let deps = [EntityId::of(&book.id)];

        if let Err(err) = self
            .cache
            .put(
                &book_key(author, name, Mode::Full),
                &deps,
                book,
                Some(ENTITY_TTL),
            )
            .await
        {
            warn!(error = %err, "failed to warm full book cache");
        }
        if let Err(err) = self
            .cache
            .put(
                &book_key(author, name, Mode::Redacted),
                &deps,
                &book.redacted(),
                Some(ENTITY_TTL),
            )
            .await
        {
            warn!(error = %err, "failed to warm redacted book cache");
        }
    }
}

/// Batch lookup. Requests are order-normalized, so any permutation of
/// the same set shares one cache entry tagged with every member book.
#[derive(Clone)]
pub struct GetBooksQueryHandler {
    single: GetBookQueryHandler,
    cache: DerivedCache,
}

impl GetBooksQueryHandler {
    pub fn new(db: MongoConnect, cache: DerivedCache) -> Self {
        Self {
            single: GetBookQueryHandler::new(db, cache.clone()),
            cache,
        }
    }

    #[instrument(skip(self))]
    pub async fn full(
        &self, refs: &[BookRef],
    ) -> Result<Vec<Book>, BookError> {
        let refs = normalized(refs);
        if refs.len() == 1 {
            return Ok(vec![
                self.single.full(&refs[0].author, &refs[0].name).await?,
            ]);
        }

        let key = book_batch_key(&refs, Mode::Full);
        match self.cache.get::<Vec<Book>>(&key).await {
            Ok(Some(books)) => {
                debug!("Cache hit for book batch of {}", refs.len());
                return Ok(books);
            }
            Ok(None) => {}
            Err(err) => {
                warn!(error = %err, "cache read failed, going to store")
            }
        }

        self.load(&refs).await
    }

    #[instrument(skip(self))]
    pub async fn redacted(
        &self, refs: &[BookRef],
    ) -> Result<Vec<RedactedBook>, BookError> {
        let refs = normalized(refs);
        if refs.len() == 1 {
            return Ok(vec![
                self.single
                    .redacted(&refs[0].author, &refs[0].name)
                    .await?,
            ]);
        }

        let key = book_batch_key(&refs, Mode::Redacted);
        match self.cache.get::<Vec<RedactedBook>>(&key).await {
            Ok(Some(books)) => {
                debug!("Cache hit for book batch of {}", refs.len());
                return Ok(books);
            }
            Ok(None) => {}
            Err(err) => {
                warn!(error = %err, "cache read failed, going to store")
            }
        }

        let books = self.load(&refs).await?;
        Ok(books.iter().map(Book::redacted).collect())
    }

    /// Resolve every member through the single-book path (which warms
    /// the per-book entries), then cache both batch projections tagged
    /// with every constituent book.
    async fn load(&self, refs: &[BookRef]) -> Result<Vec<Book>, BookError> {
        let mut books = Vec::with_capacity(refs.len());
        for r in refs {
            books.push(self.single.full(&r.author, &r.name).await?);
        }

        let deps: Vec<EntityId> =
            books.iter().map(|b| EntityId::of(&b.id)).collect();
        let redacted: Vec<RedactedBook> =
            books.iter().map(Book::redacted).collect();

        if let Err(err) = self
            .cache
            .put(
                &book_batch_key(refs, Mode::Full),
                &deps,
                &books,
                Some(LIST_TTL),
            )
            .await
        {
            warn!(error = %err, "failed to warm full batch cache");
        }
        if let Err(err) = self
            .cache
            .put(
                &book_batch_key(refs, Mode::Redacted),
                &deps,
                &redacted,
                Some(LIST_TTL),
            )
            .await
        {
            warn!(error = %err, "failed to warm redacted batch cache");
        }

        Ok(books)
    }
}

fn normalized(refs: &[BookRef]) -> Vec<BookRef> {
    let mut refs = refs.to_vec();
    refs.sort();
    refs.dedup();
    refs
}

/// The whole-catalog listing. Tagged with every listed book plus the
/// collection sentinel, so both edits and inserts/deletes drop it.
#[derive(Clone)]
pub struct ListBooksQueryHandler {
    book_dao: BookDao,
    cache: DerivedCache,
}

impl ListBooksQueryHandler {
    pub fn new(db: MongoConnect, cache: DerivedCache) -> Self {
        Self {
            book_dao: BookDao::new(db),
            cache,
        }
    }

    #[instrument(skip(self))]
    pub async fn full(&self) -> Result<Vec<Book>, BookError> {
        let key = book_list_key(Mode::Full);
        match self.cache.get::<Vec<Book>>(&key).await {
            Ok(Some(books)) => {
                debug!("Cache hit for book list");
                return Ok(books);
            }
            Ok(None) => {}
            Err(err) => {
                warn!(error = %err, "cache read failed, going to store")
            }
        }

        self.load().await
    }

    #[instrument(skip(self))]
    pub async fn redacted(&self) -> Result<Vec<RedactedBook>, BookError> {
        let key = book_list_key(Mode::Redacted);
        match self.cache.get::<Vec<RedactedBook>>(&key).await {
            Ok(Some(books)) => {
                debug!("Cache hit for book list");
                return Ok(books);
            }
            Ok(None) => {}
            Err(err) => {
                warn!(error = %err, "cache read failed, going to store")
            }
        }

        let books = self.load().await?;
        Ok(books.iter().map(Book::redacted).collect())
    }

    async fn load(&self) -> Result<Vec<Book>, BookError> {
        let books = self.book_dao.all().await?;

        let mut deps: Vec<EntityId> =
            books.iter().map(|b| EntityId::of(&b.id)).collect();
        deps.push(book_collection_tag());

        let redacted: Vec<RedactedBook> =
            books.iter().map(Book::redacted).collect();

        if let Err(err) = self
            .cache
            .put(
                &book_list_key(Mode::Full),
                &deps,
                &books,
                Some(LIST_TTL),
            )
            .await
        {
            warn!(error = %err, "failed to warm full book list cache");
        }
        if let Err(err) = self
            .cache
            .put(
                &book_list_key(Mode::Redacted),
                &deps,
                &redacted,
                Some(LIST_TTL),
            )
            .await
        {
            warn!(error = %err, "failed to warm redacted book list cache");
        }

        Ok(books)
    }
}
